// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::draft::SelectedFile;
use crate::schema::FileSlot;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Creates and releases local preview handles for selected files.
pub trait PreviewBackend<F> {
	type Handle;

	/// Creates a preview handle for the file, or `None` if the platform couldn't produce one.
	fn create(&mut self, file: &F) -> Option<Self::Handle>;

	fn revoke(&mut self, handle: Self::Handle);
}

/// Owns at most one preview handle per file slot.
///
/// Installing a preview into an occupied slot revokes the previous handle first, and dropping the
/// manager revokes everything still held, so handles can't outlive the dialog that created them.
pub struct PreviewManager<F, B: PreviewBackend<F>> {
	backend: B,
	handles: BTreeMap<FileSlot, B::Handle>,
	_file: PhantomData<fn(&F)>,
}

impl<F: SelectedFile, B: PreviewBackend<F>> PreviewManager<F, B> {
	pub fn new(backend: B) -> Self {
		Self {
			backend,
			handles: BTreeMap::new(),
			_file: PhantomData,
		}
	}

	/// Replaces the preview for a slot with one for the given file.
	///
	/// Passing `None` (nothing chosen in the picker) leaves the slot untouched. Files that can't be
	/// previewed still clear the slot's previous preview.
	pub fn install(&mut self, slot: FileSlot, file: Option<&F>) {
		let Some(file) = file else {
			return;
		};
		self.release(slot);
		if !file.is_previewable() {
			log::debug!("No preview for {} ({})", file.file_name(), file.mime_type());
			return;
		}
		match self.backend.create(file) {
			Some(handle) => {
				self.handles.insert(slot, handle);
			}
			None => log::warn!("Failed to create a preview for {}", file.file_name()),
		}
	}

	/// Revokes the handle in a slot, if there is one.
	pub fn release(&mut self, slot: FileSlot) {
		if let Some(handle) = self.handles.remove(&slot) {
			self.backend.revoke(handle);
		}
	}

	pub fn release_all(&mut self) {
		let handles = std::mem::take(&mut self.handles);
		for (_, handle) in handles {
			self.backend.revoke(handle);
		}
	}

	pub fn handle(&self, slot: FileSlot) -> Option<&B::Handle> {
		self.handles.get(&slot)
	}

	pub fn live_count(&self) -> usize {
		self.handles.len()
	}
}

impl<F, B: PreviewBackend<F>> Drop for PreviewManager<F, B> {
	fn drop(&mut self) {
		let handles = std::mem::take(&mut self.handles);
		for (_, handle) in handles {
			self.backend.revoke(handle);
		}
	}
}
