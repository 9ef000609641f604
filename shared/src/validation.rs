// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::draft::{RegistrantDraft, SelectedFile};
use crate::schema::{FieldDescriptor, FileDescriptor, FormSchema, InputId, StepDescriptor, Validator};
use std::collections::BTreeMap;

/// Per-input validation messages for the open form.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldErrorSet {
	errors: BTreeMap<InputId, String>,
}

impl FieldErrorSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, input: impl Into<InputId>) -> Option<&str> {
		self.errors.get(&input.into()).map(String::as_str)
	}

	pub fn insert(&mut self, input: impl Into<InputId>, message: String) {
		self.errors.insert(input.into(), message);
	}

	pub fn clear_input(&mut self, input: impl Into<InputId>) {
		self.errors.remove(&input.into());
	}

	pub fn clear(&mut self) {
		self.errors.clear();
	}

	/// Replaces the entries for the given inputs with the entries of a fresh validation pass.
	/// Entries for inputs outside the pass are left alone.
	pub fn replace_covered(&mut self, covered: &[InputId], fresh: FieldErrorSet) {
		for input in covered {
			self.errors.remove(input);
		}
		self.errors.extend(fresh.errors);
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	pub fn len(&self) -> usize {
		self.errors.len()
	}

	pub fn inputs(&self) -> impl Iterator<Item = InputId> + '_ {
		self.errors.keys().copied()
	}

	pub fn iter(&self) -> impl Iterator<Item = (InputId, &str)> {
		self.errors.iter().map(|(input, message)| (*input, message.as_str()))
	}
}

/// Limits applied to attached files in addition to presence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct UploadLimits {
	pub max_bytes: Option<u64>,
}

/// Checks for the `local@domain.tld` shape. Stricter address validation is left to the server.
pub fn is_plausible_email(value: &str) -> bool {
	if value.chars().any(char::is_whitespace) {
		return false;
	}
	let Some((local, domain)) = value.rsplit_once('@') else {
		return false;
	};
	if local.is_empty() || local.contains('@') {
		return false;
	}
	domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

pub fn is_http_url(value: &str) -> bool {
	let rest = value
		.strip_prefix("https://")
		.or_else(|| value.strip_prefix("http://"));
	match rest {
		Some(rest) => {
			let host = rest.split(['/', '?', '#']).next().unwrap_or("");
			!host.is_empty() && !host.chars().any(char::is_whitespace)
		}
		None => false,
	}
}

fn check_field<F>(field: &FieldDescriptor, draft: &RegistrantDraft<F>) -> Option<String> {
	let value = draft.value(field.key).trim();
	if value.is_empty() {
		if field.required {
			return Some(format!("{} is required.", field.label));
		}
		return None;
	}

	match field.validator {
		Validator::Any => None,
		Validator::Email => {
			if is_plausible_email(value) {
				None
			} else {
				Some(String::from("Please enter a valid email address."))
			}
		}
		Validator::HttpUrl => {
			if is_http_url(value) {
				None
			} else {
				Some(String::from("Please enter a link starting with http:// or https://."))
			}
		}
		Validator::OneOf => {
			if field.kind.options().contains(&value) {
				None
			} else {
				Some(format!("Please choose one of the options for {}.", field.label))
			}
		}
	}
}

fn check_file<F: SelectedFile>(file: &FileDescriptor, draft: &RegistrantDraft<F>, limits: UploadLimits) -> Option<String> {
	match draft.file(file.slot) {
		None if file.required => Some(format!("Please attach your {}.", file.label)),
		None => None,
		Some(selected) => match limits.max_bytes {
			Some(max_bytes) if selected.size() > max_bytes => Some(format!(
				"{} is too large ({} bytes, at most {} allowed).",
				file.label,
				selected.size(),
				max_bytes
			)),
			_ => None,
		},
	}
}

/// Lists every input a step covers, in display order.
pub fn step_inputs(step: &StepDescriptor) -> Vec<InputId> {
	step.fields
		.iter()
		.map(|field| InputId::Field(field.key))
		.chain(step.files.iter().map(|file| InputId::File(file.slot)))
		.collect()
}

/// Validates the inputs of a single step.
pub fn validate_step<F: SelectedFile>(
	step: &StepDescriptor,
	draft: &RegistrantDraft<F>,
	limits: UploadLimits,
) -> FieldErrorSet {
	let mut errors = FieldErrorSet::new();
	for field in step.fields.iter() {
		if let Some(message) = check_field(field, draft) {
			errors.insert(field.key, message);
		}
	}
	for file in step.files.iter() {
		if let Some(message) = check_file(file, draft, limits) {
			errors.insert(file.slot, message);
		}
	}
	errors
}

/// Validates every input of the form, including files.
pub fn validate_all<F: SelectedFile>(
	schema: &FormSchema,
	draft: &RegistrantDraft<F>,
	limits: UploadLimits,
) -> FieldErrorSet {
	let mut errors = FieldErrorSet::new();
	for step in schema.steps() {
		errors.errors.extend(validate_step(step, draft, limits).errors);
	}
	errors
}

/// Gets the earliest 1-based step containing one of the failing inputs.
pub fn earliest_failing_step(schema: &FormSchema, errors: &FieldErrorSet) -> Option<usize> {
	errors.inputs().filter_map(|input| schema.step_of(input)).min()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::{FieldKey, FileSlot};
	use crate::test_support::{filled_basic_info, image_file, FakeFile};

	#[test]
	fn email_shapes() {
		for good in ["a@b.co", "first.last@uni.edu.pk", "x+y@mail.example.org"] {
			assert!(is_plausible_email(good), "{good} should be accepted");
		}
		for bad in [
			"",
			"plainaddress",
			"no-domain@",
			"@no-local.com",
			"no-dot@domain",
			"trailing-dot@domain.",
			"two@@signs.com",
			"space in@domain.com",
			"dot-first@.com",
			"a@b..com",
			"inner@uni..edu.pk",
		] {
			assert!(!is_plausible_email(bad), "{bad} should be rejected");
		}
	}

	#[test]
	fn malformed_email_gets_an_email_specific_message() {
		let schema = FormSchema::registration();
		let mut draft = filled_basic_info();
		for bad in ["student", "student@uni", "student.uni.edu"] {
			draft.set_value(FieldKey::Email, bad);
			let errors = validate_step(&schema.steps()[0], &draft, UploadLimits::default());
			assert_eq!(errors.len(), 1);
			assert_eq!(errors.get(FieldKey::Email), Some("Please enter a valid email address."));
		}
	}

	#[test]
	fn whitespace_only_counts_as_blank() {
		let schema = FormSchema::registration();
		let mut draft = filled_basic_info();
		draft.set_value(FieldKey::Cnic, "   \t");
		let errors = validate_step(&schema.steps()[0], &draft, UploadLimits::default());
		assert_eq!(errors.get(FieldKey::Cnic), Some("CNIC is required."));
	}

	#[test]
	fn only_full_name_filled() {
		let schema = FormSchema::registration();
		let mut draft: RegistrantDraft<FakeFile> = RegistrantDraft::new();
		draft.set_value(FieldKey::FullName, "Ayesha Khan");

		let errors = validate_step(&schema.steps()[0], &draft, UploadLimits::default());
		let failing: Vec<InputId> = errors.inputs().collect();
		assert_eq!(
			failing,
			vec![
				InputId::Field(FieldKey::Email),
				InputId::Field(FieldKey::Phone),
				InputId::Field(FieldKey::Cnic),
				InputId::Field(FieldKey::University),
			]
		);
	}

	#[test]
	fn missing_files_and_earliest_step() {
		let schema = FormSchema::registration();
		let mut draft = filled_basic_info();
		draft.set_file(FileSlot::CnicFront, image_file("front.png"));

		let errors = validate_all(&schema, &draft, UploadLimits::default());
		assert_eq!(errors.len(), 2);
		assert!(errors.get(FileSlot::CnicBack).is_some());
		assert!(errors.get(FileSlot::UniversityCard).is_some());
		assert_eq!(earliest_failing_step(&schema, &errors), Some(2));

		draft.set_value(FieldKey::Phone, "");
		let errors = validate_all(&schema, &draft, UploadLimits::default());
		assert_eq!(earliest_failing_step(&schema, &errors), Some(1));
	}

	#[test]
	fn size_limit_is_only_enforced_when_configured() {
		let schema = FormSchema::registration();
		let mut draft = filled_basic_info();
		let big = FakeFile::new("scan.png", "image/png", 8 * 1024 * 1024);
		for slot in FileSlot::ALL {
			draft.set_file(slot, big.clone());
		}

		assert!(validate_all(&schema, &draft, UploadLimits::default()).is_empty());

		let limits = UploadLimits {
			max_bytes: Some(5 * 1024 * 1024),
		};
		assert_eq!(validate_all(&schema, &draft, limits).len(), 3);
	}

	#[test]
	fn application_choice_and_url_fields() {
		let schema = FormSchema::application();
		let mut draft: RegistrantDraft<FakeFile> = RegistrantDraft::new();
		draft.set_value(FieldKey::HeardFrom, "Billboard");
		draft.set_value(FieldKey::TedVideoUrl, "youtube.com/watch");
		draft.set_value(FieldKey::AttendedBefore, "Yes");

		let errors = validate_step(&schema.steps()[2], &draft, UploadLimits::default());
		assert!(errors.get(FieldKey::HeardFrom).is_some());
		assert!(errors.get(FieldKey::TedVideoUrl).is_some());
		assert!(errors.get(FieldKey::AttendedBefore).is_none());
		assert!(errors.get(FieldKey::Portfolio).is_none());

		draft.set_value(FieldKey::HeardFrom, "Friend");
		draft.set_value(FieldKey::TedVideoUrl, "https://www.ted.com/talks/example");
		let errors = validate_step(&schema.steps()[2], &draft, UploadLimits::default());
		assert!(errors.get(FieldKey::HeardFrom).is_none());
		assert!(errors.get(FieldKey::TedVideoUrl).is_none());
	}

	#[test]
	fn replace_covered_keeps_other_entries() {
		let mut errors = FieldErrorSet::new();
		errors.insert(FieldKey::Email, String::from("old"));
		errors.insert(FileSlot::CnicBack, String::from("missing"));

		let mut fresh = FieldErrorSet::new();
		fresh.insert(FieldKey::Phone, String::from("Phone is required."));
		errors.replace_covered(&[FieldKey::Email.into(), FieldKey::Phone.into()], fresh);

		assert_eq!(errors.get(FieldKey::Email), None);
		assert_eq!(errors.get(FieldKey::Phone), Some("Phone is required."));
		assert_eq!(errors.get(FileSlot::CnicBack), Some("missing"));
	}
}
