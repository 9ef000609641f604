// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use tedx_registration_shared::draft::SelectedFile;
use tedx_registration_shared::preview::PreviewBackend;
use wasm_bindgen::JsCast;
use web_sys::{Event as WebEvent, File, HtmlInputElement, Url};

/// A file picked through a browser file input
#[derive(Clone)]
pub struct BrowserFile(File);

impl BrowserFile {
	/// Gets the first file chosen in the file input that fired the event, if any.
	pub fn from_change_event(event: &WebEvent) -> Option<Self> {
		let input: HtmlInputElement = event.target()?.dyn_into().ok()?;
		let file = input.files()?.get(0)?;
		Some(Self(file))
	}

	pub fn as_file(&self) -> &File {
		&self.0
	}
}

impl SelectedFile for BrowserFile {
	fn file_name(&self) -> String {
		self.0.name()
	}

	fn mime_type(&self) -> String {
		self.0.type_()
	}

	fn size(&self) -> u64 {
		self.0.size() as u64
	}
}

/// Previews backed by `blob:` object URLs
#[derive(Default)]
pub struct ObjectUrlPreviews;

impl PreviewBackend<BrowserFile> for ObjectUrlPreviews {
	type Handle = String;

	fn create(&mut self, file: &BrowserFile) -> Option<String> {
		match Url::create_object_url_with_blob(file.as_file()) {
			Ok(url) => Some(url),
			Err(error) => {
				log::warn!("Failed to create an object URL for {}: {:?}", file.file_name(), error);
				None
			}
		}
	}

	fn revoke(&mut self, handle: String) {
		if let Err(error) = Url::revoke_object_url(&handle) {
			log::warn!("Failed to revoke object URL {}: {:?}", handle, error);
		}
	}
}
