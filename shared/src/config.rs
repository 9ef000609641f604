// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::schema::FormVariant;
use crate::validation::UploadLimits;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGISTRATION_ENDPOINT: &str = "http://127.0.0.1:5000/register";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 20_000;

/// Runtime settings handed to the client by the host at `/config.json`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ClientConfig {
	pub event_name: String,
	pub registration_endpoint: String,
	pub request_timeout_ms: u32,
	pub form_variant: FormVariant,
	pub max_upload_bytes: Option<u64>,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			event_name: String::from("TEDx"),
			registration_endpoint: String::from(DEFAULT_REGISTRATION_ENDPOINT),
			request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
			form_variant: FormVariant::default(),
			max_upload_bytes: None,
		}
	}
}

impl ClientConfig {
	pub fn upload_limits(&self) -> UploadLimits {
		UploadLimits {
			max_bytes: self.max_upload_bytes,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_keys_fall_back_to_defaults() {
		let config: ClientConfig =
			serde_json::from_str(r#"{"event_name":"TEDxNUST","form_variant":"application"}"#).unwrap();
		assert_eq!(config.event_name, "TEDxNUST");
		assert_eq!(config.form_variant, FormVariant::Application);
		assert_eq!(config.registration_endpoint, DEFAULT_REGISTRATION_ENDPOINT);
		assert_eq!(config.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
		assert_eq!(config.upload_limits(), UploadLimits::default());
	}
}
