// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use web_sys::window;

/// Sets the title of the browser tab.
pub fn set_page_title(new_title: &str) {
	match window().and_then(|window| window.document()) {
		Some(document) => document.set_title(new_title),
		None => log::warn!("No document to set the title \"{}\" on", new_title),
	}
}
