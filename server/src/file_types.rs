// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_std::path::Path;

/// Gets the media type (MIME type) for a file based on the file path.
/// Uses "application/octet-stream" as the type for files with an unknown type.
pub fn get_media_type(file_path: &Path) -> &'static str {
	let Some(file_extension) = file_path.extension().and_then(|ext| ext.to_str()) else {
		return "application/octet-stream";
	};
	match file_extension {
		"html" => "text/html",
		"css" => "text/css",
		"js" => "text/javascript",
		"wasm" => "application/wasm",
		"json" => "application/json",
		"svg" => "image/svg+xml",
		"png" => "image/png",
		"jpg" | "jpeg" => "image/jpeg",
		"ico" => "image/x-icon",
		"woff2" => "font/woff2",
		_ => "application/octet-stream",
	}
}
