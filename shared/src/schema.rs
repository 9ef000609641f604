// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Declarative description of the registration form.
//!
//! Both form variants are described by the same [`FormSchema`] type: an ordered list of steps, each
//! listing the text fields and file slots it contains. Everything else (validation, step gating,
//! payload construction, rendering) is driven from this description.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named text input of the registrant draft.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FieldKey {
	FullName,
	Sex,
	Email,
	DateOfBirth,
	SocialProfile,
	Phone,
	Cnic,
	University,
	Major,
	AmbassadorCode,
	WhyInLife,
	BetterCommunity,
	TedVideo,
	TedVideoUrl,
	Portfolio,
	AttendedBefore,
	HeardFrom,
}

impl FieldKey {
	pub fn name(&self) -> &'static str {
		match self {
			Self::FullName => "fullName",
			Self::Sex => "sex",
			Self::Email => "email",
			Self::DateOfBirth => "dateOfBirth",
			Self::SocialProfile => "socialProfile",
			Self::Phone => "phone",
			Self::Cnic => "cnic",
			Self::University => "university",
			Self::Major => "major",
			Self::AmbassadorCode => "ambassadorCode",
			Self::WhyInLife => "whyInLife",
			Self::BetterCommunity => "betterCommunity",
			Self::TedVideo => "tedVideo",
			Self::TedVideoUrl => "tedVideoUrl",
			Self::Portfolio => "portfolio",
			Self::AttendedBefore => "attendedBefore",
			Self::HeardFrom => "heardFrom",
		}
	}
}

/// One of the file upload targets.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FileSlot {
	CnicFront,
	CnicBack,
	UniversityCard,
}

impl FileSlot {
	pub const ALL: [FileSlot; 3] = [FileSlot::CnicFront, FileSlot::CnicBack, FileSlot::UniversityCard];

	pub fn name(&self) -> &'static str {
		match self {
			Self::CnicFront => "cnicFront",
			Self::CnicBack => "cnicBack",
			Self::UniversityCard => "universityCard",
		}
	}
}

/// Identifies any input of the form, text or file, for error reporting.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum InputId {
	Field(FieldKey),
	File(FileSlot),
}

impl InputId {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Field(key) => key.name(),
			Self::File(slot) => slot.name(),
		}
	}
}

impl From<FieldKey> for InputId {
	fn from(key: FieldKey) -> Self {
		Self::Field(key)
	}
}

impl From<FileSlot> for InputId {
	fn from(slot: FileSlot) -> Self {
		Self::File(slot)
	}
}

/// How a text field is presented and what values it accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
	Text,
	Email,
	Tel,
	Date,
	Url,
	LongText,
	Radio(&'static [&'static str]),
	Select(&'static [&'static str]),
}

impl FieldKind {
	/// Options for choice fields; empty for free-text fields.
	pub fn options(&self) -> &'static [&'static str] {
		match self {
			Self::Radio(options) | Self::Select(options) => options,
			_ => &[],
		}
	}
}

/// Shape check applied to a non-empty value after the required check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Validator {
	Any,
	Email,
	HttpUrl,
	OneOf,
}

#[derive(Clone, Debug)]
pub struct FieldDescriptor {
	pub key: FieldKey,
	pub label: &'static str,
	pub placeholder: &'static str,
	pub kind: FieldKind,
	pub required: bool,
	pub validator: Validator,
	/// Multipart key expected by the registration endpoint
	pub wire_key: &'static str,
}

impl FieldDescriptor {
	fn new(key: FieldKey, label: &'static str, kind: FieldKind, wire_key: &'static str) -> Self {
		let validator = match kind {
			FieldKind::Email => Validator::Email,
			FieldKind::Url => Validator::HttpUrl,
			FieldKind::Radio(_) | FieldKind::Select(_) => Validator::OneOf,
			_ => Validator::Any,
		};
		Self {
			key,
			label,
			placeholder: "",
			kind,
			required: true,
			validator,
			wire_key,
		}
	}

	fn placeholder(mut self, placeholder: &'static str) -> Self {
		self.placeholder = placeholder;
		self
	}

	fn optional(mut self) -> Self {
		self.required = false;
		self
	}
}

#[derive(Clone, Debug)]
pub struct FileDescriptor {
	pub slot: FileSlot,
	pub label: &'static str,
	pub required: bool,
	/// Value for the file picker's `accept` attribute
	pub accept: &'static str,
	pub wire_key: &'static str,
}

impl FileDescriptor {
	fn new(slot: FileSlot, label: &'static str, wire_key: &'static str) -> Self {
		Self {
			slot,
			label,
			required: true,
			accept: "image/*,.pdf",
			wire_key,
		}
	}
}

#[derive(Clone, Debug)]
pub struct StepDescriptor {
	pub title: &'static str,
	pub fields: Vec<FieldDescriptor>,
	pub files: Vec<FileDescriptor>,
}

impl StepDescriptor {
	pub fn contains(&self, input: InputId) -> bool {
		match input {
			InputId::Field(key) => self.fields.iter().any(|field| field.key == key),
			InputId::File(slot) => self.files.iter().any(|file| file.slot == slot),
		}
	}
}

/// Which of the two known form layouts to present.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormVariant {
	/// Basic information followed by document uploads
	#[default]
	Registration,
	/// Three-step application with personal questions before the uploads
	Application,
}

#[derive(Debug)]
pub struct UnknownVariantError(String);

impl fmt::Display for UnknownVariantError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"unknown form variant \"{}\" (expected \"registration\" or \"application\")",
			self.0
		)
	}
}

impl std::error::Error for UnknownVariantError {}

impl FromStr for FormVariant {
	type Err = UnknownVariantError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"registration" => Ok(Self::Registration),
			"application" => Ok(Self::Application),
			_ => Err(UnknownVariantError(s.to_string())),
		}
	}
}

const SEX_OPTIONS: &[&str] = &["Male", "Female"];
const YES_NO_OPTIONS: &[&str] = &["Yes", "No"];
const HEARD_FROM_OPTIONS: &[&str] = &["Facebook", "Twitter", "Instagram", "Snapchat", "Tumblr", "Friend"];

fn document_uploads() -> Vec<FileDescriptor> {
	vec![
		FileDescriptor::new(FileSlot::CnicFront, "CNIC (front)", "cnic_front_picture"),
		FileDescriptor::new(FileSlot::CnicBack, "CNIC (back)", "cnic_back_picture"),
		FileDescriptor::new(FileSlot::UniversityCard, "University card", "university_card_picture"),
	]
}

/// The ordered steps of one form variant.
#[derive(Clone, Debug)]
pub struct FormSchema {
	variant: FormVariant,
	steps: Vec<StepDescriptor>,
}

impl FormSchema {
	pub fn for_variant(variant: FormVariant) -> Self {
		match variant {
			FormVariant::Registration => Self::registration(),
			FormVariant::Application => Self::application(),
		}
	}

	pub fn registration() -> Self {
		let basic_info = StepDescriptor {
			title: "Basic Info",
			fields: vec![
				FieldDescriptor::new(FieldKey::FullName, "Full name", FieldKind::Text, "name")
					.placeholder("Your full name"),
				FieldDescriptor::new(FieldKey::University, "University", FieldKind::Text, "university")
					.placeholder("Your university or institute"),
				FieldDescriptor::new(FieldKey::Email, "Email", FieldKind::Email, "email")
					.placeholder("you@example.com"),
				FieldDescriptor::new(FieldKey::Cnic, "CNIC", FieldKind::Text, "cnic").placeholder("00000-0000000-0"),
				FieldDescriptor::new(FieldKey::Phone, "Phone", FieldKind::Tel, "phone").placeholder("03XX-XXXXXXX"),
			],
			files: Vec::new(),
		};
		let documents = StepDescriptor {
			title: "Documents",
			fields: Vec::new(),
			files: document_uploads(),
		};
		Self {
			variant: FormVariant::Registration,
			steps: vec![basic_info, documents],
		}
	}

	pub fn application() -> Self {
		let basic_info = StepDescriptor {
			title: "Basic Info",
			fields: vec![
				FieldDescriptor::new(FieldKey::FullName, "Full name", FieldKind::Text, "name")
					.placeholder("Your full name"),
				FieldDescriptor::new(FieldKey::Sex, "Sex", FieldKind::Radio(SEX_OPTIONS), "sex"),
				FieldDescriptor::new(FieldKey::Email, "Email", FieldKind::Email, "email")
					.placeholder("you@example.com"),
				FieldDescriptor::new(FieldKey::DateOfBirth, "Date of birth", FieldKind::Date, "dob"),
				FieldDescriptor::new(
					FieldKey::SocialProfile,
					"Social profile",
					FieldKind::Text,
					"social_profile",
				)
				.placeholder("Link or handle"),
				FieldDescriptor::new(FieldKey::Phone, "Contact number", FieldKind::Tel, "phone")
					.placeholder("03XX-XXXXXXX"),
				FieldDescriptor::new(FieldKey::Cnic, "CNIC", FieldKind::Text, "cnic").placeholder("00000-0000000-0"),
			],
			files: Vec::new(),
		};
		let personal_details = StepDescriptor {
			title: "Personal Details",
			fields: vec![
				FieldDescriptor::new(FieldKey::University, "Institute", FieldKind::Text, "university"),
				FieldDescriptor::new(FieldKey::Major, "Major", FieldKind::Text, "major"),
				FieldDescriptor::new(
					FieldKey::AmbassadorCode,
					"Ambassador code",
					FieldKind::Text,
					"ambassador_code",
				)
				.optional(),
				FieldDescriptor::new(
					FieldKey::WhyInLife,
					"What do you want to achieve in life, and why?",
					FieldKind::LongText,
					"why_in_life",
				),
				FieldDescriptor::new(
					FieldKey::BetterCommunity,
					"How would you make your community better?",
					FieldKind::LongText,
					"better_community",
				),
			],
			files: Vec::new(),
		};
		let final_questions = StepDescriptor {
			title: "Final Questions",
			fields: vec![
				FieldDescriptor::new(
					FieldKey::TedVideo,
					"Which TED talk inspired you the most?",
					FieldKind::Text,
					"ted_video",
				),
				FieldDescriptor::new(FieldKey::TedVideoUrl, "Link to the talk", FieldKind::Url, "ted_video_url")
					.placeholder("https://")
					.optional(),
				FieldDescriptor::new(FieldKey::Portfolio, "Portfolio", FieldKind::Url, "portfolio")
					.placeholder("https://")
					.optional(),
				FieldDescriptor::new(
					FieldKey::AttendedBefore,
					"Have you attended a TEDx event before?",
					FieldKind::Radio(YES_NO_OPTIONS),
					"attended_before",
				),
				FieldDescriptor::new(
					FieldKey::HeardFrom,
					"Where did you hear about us?",
					FieldKind::Select(HEARD_FROM_OPTIONS),
					"heard_from",
				),
			],
			files: document_uploads(),
		};
		Self {
			variant: FormVariant::Application,
			steps: vec![basic_info, personal_details, final_questions],
		}
	}

	pub fn variant(&self) -> FormVariant {
		self.variant
	}

	pub fn step_count(&self) -> usize {
		self.steps.len()
	}

	pub fn steps(&self) -> &[StepDescriptor] {
		&self.steps
	}

	/// Gets a step by its 1-based position.
	pub fn step(&self, position: usize) -> Option<&StepDescriptor> {
		position.checked_sub(1).and_then(|index| self.steps.get(index))
	}

	/// Gets the 1-based position of the step containing the given input.
	pub fn step_of(&self, input: InputId) -> Option<usize> {
		self.steps
			.iter()
			.position(|step| step.contains(input))
			.map(|index| index + 1)
	}

	pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
		self.steps.iter().flat_map(|step| step.fields.iter())
	}

	pub fn files(&self) -> impl Iterator<Item = &FileDescriptor> {
		self.steps.iter().flat_map(|step| step.files.iter())
	}

	pub fn field(&self, key: FieldKey) -> Option<&FieldDescriptor> {
		self.fields().find(|field| field.key == key)
	}

	pub fn file(&self, slot: FileSlot) -> Option<&FileDescriptor> {
		self.files().find(|file| file.slot == slot)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn registration_has_two_steps_and_eight_wire_keys() {
		let schema = FormSchema::registration();
		assert_eq!(schema.step_count(), 2);

		let mut keys: Vec<&str> = schema
			.fields()
			.map(|field| field.wire_key)
			.chain(schema.files().map(|file| file.wire_key))
			.collect();
		keys.sort_unstable();
		assert_eq!(
			keys,
			vec![
				"cnic",
				"cnic_back_picture",
				"cnic_front_picture",
				"email",
				"name",
				"phone",
				"university",
				"university_card_picture",
			]
		);
	}

	#[test]
	fn application_puts_uploads_on_the_last_step() {
		let schema = FormSchema::application();
		assert_eq!(schema.step_count(), 3);
		for slot in FileSlot::ALL {
			assert_eq!(schema.step_of(slot.into()), Some(3));
		}
		assert_eq!(schema.step_of(FieldKey::Major.into()), Some(2));
		assert_eq!(schema.step_of(FieldKey::Sex.into()), Some(1));
	}

	#[test]
	fn step_lookup_is_one_based() {
		let schema = FormSchema::registration();
		assert!(schema.step(0).is_none());
		assert_eq!(schema.step(1).map(|step| step.title), Some("Basic Info"));
		assert_eq!(schema.step(2).map(|step| step.title), Some("Documents"));
		assert!(schema.step(3).is_none());
	}

	#[test]
	fn variants_parse_from_config_strings() {
		assert_eq!("registration".parse::<FormVariant>().ok(), Some(FormVariant::Registration));
		assert_eq!("application".parse::<FormVariant>().ok(), Some(FormVariant::Application));
		assert!("wizard".parse::<FormVariant>().is_err());
	}
}
