// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::schema::{FieldKey, FileSlot};
use std::collections::BTreeMap;

/// A file the user picked locally. Implemented by the platform layer (browser `File` objects on
/// the client).
pub trait SelectedFile: Clone {
	fn file_name(&self) -> String;
	fn mime_type(&self) -> String;
	fn size(&self) -> u64;

	/// Whether a local preview can be shown for this file
	fn is_previewable(&self) -> bool {
		self.mime_type().starts_with("image/")
	}
}

/// The in-memory, unsaved registrant record being edited in an open dialog.
#[derive(Clone, Debug)]
pub struct RegistrantDraft<F> {
	values: BTreeMap<FieldKey, String>,
	files: BTreeMap<FileSlot, F>,
}

impl<F> Default for RegistrantDraft<F> {
	fn default() -> Self {
		Self {
			values: BTreeMap::new(),
			files: BTreeMap::new(),
		}
	}
}

impl<F> RegistrantDraft<F> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Gets the current value of a field; fields never set read as empty.
	pub fn value(&self, key: FieldKey) -> &str {
		self.values.get(&key).map(String::as_str).unwrap_or("")
	}

	pub fn set_value(&mut self, key: FieldKey, value: impl Into<String>) {
		self.values.insert(key, value.into());
	}

	pub fn file(&self, slot: FileSlot) -> Option<&F> {
		self.files.get(&slot)
	}

	/// Stores a file in a slot, returning the file it replaced.
	pub fn set_file(&mut self, slot: FileSlot, file: F) -> Option<F> {
		self.files.insert(slot, file)
	}

	pub fn remove_file(&mut self, slot: FileSlot) -> Option<F> {
		self.files.remove(&slot)
	}

	pub fn clear(&mut self) {
		self.values.clear();
		self.files.clear();
	}

	pub fn is_empty(&self) -> bool {
		self.values.values().all(|value| value.is_empty()) && self.files.is_empty()
	}
}
