// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use wasm_bindgen::JsValue;

/// Errors from talking to the browser or the host
pub enum ClientError {
	NoBrowserContext,
	Browser(String),
	Http(gloo_net::Error),
	Status(u16),
	Json(serde_json::Error),
}

impl From<JsValue> for ClientError {
	fn from(value: JsValue) -> Self {
		let description = value.as_string().unwrap_or_else(|| format!("{:?}", value));
		Self::Browser(description)
	}
}

impl From<gloo_net::Error> for ClientError {
	fn from(error: gloo_net::Error) -> Self {
		Self::Http(error)
	}
}

impl From<serde_json::Error> for ClientError {
	fn from(error: serde_json::Error) -> Self {
		Self::Json(error)
	}
}

impl fmt::Display for ClientError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoBrowserContext => write!(f, "The browser window isn't available"),
			Self::Browser(description) => write!(f, "A browser operation failed: {}", description),
			Self::Http(error) => write!(f, "{}", error),
			Self::Status(status) => write!(f, "The server responded with status {}", status),
			Self::Json(error) => write!(f, "An invalid response was received: {}", error),
		}
	}
}
