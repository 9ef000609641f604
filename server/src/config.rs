// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use knuffel::Decode;
use miette::{IntoDiagnostic, Result};
use std::fs;
use tedx_registration_shared::config::ClientConfig;
use tedx_registration_shared::schema::FormVariant;

const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Decode)]
pub struct ConfigDocument {
	#[knuffel(child, unwrap(argument))]
	listen: Option<String>,
	#[knuffel(child, unwrap(argument))]
	static_dir: Option<String>,
	#[knuffel(child, default)]
	client: ClientSettings,
}

/// Settings passed through to the browser client. Anything left out uses the client's default.
#[derive(Debug, Decode, Default)]
pub struct ClientSettings {
	#[knuffel(child, unwrap(argument))]
	event_name: Option<String>,
	#[knuffel(child, unwrap(argument))]
	registration_endpoint: Option<String>,
	#[knuffel(child, unwrap(argument))]
	request_timeout_ms: Option<u32>,
	#[knuffel(child, unwrap(argument))]
	form_variant: Option<String>,
	#[knuffel(child, unwrap(argument))]
	max_upload_bytes: Option<u64>,
}

impl ConfigDocument {
	pub fn listen_address(&self) -> &str {
		self.listen.as_deref().unwrap_or(DEFAULT_LISTEN_ADDRESS)
	}

	pub fn static_dir(&self) -> &str {
		self.static_dir.as_deref().unwrap_or(DEFAULT_STATIC_DIR)
	}

	pub fn client_config(&self) -> Result<ClientConfig> {
		let defaults = ClientConfig::default();
		let settings = &self.client;
		let form_variant = match &settings.form_variant {
			Some(name) => name.parse::<FormVariant>().into_diagnostic()?,
			None => defaults.form_variant,
		};
		Ok(ClientConfig {
			event_name: settings.event_name.clone().unwrap_or(defaults.event_name),
			registration_endpoint: settings
				.registration_endpoint
				.clone()
				.unwrap_or(defaults.registration_endpoint),
			request_timeout_ms: settings.request_timeout_ms.unwrap_or(defaults.request_timeout_ms),
			form_variant,
			max_upload_bytes: settings.max_upload_bytes.or(defaults.max_upload_bytes),
		})
	}
}

pub fn parse_config(path: &str) -> Result<ConfigDocument> {
	let config_file_contents = fs::read_to_string(path).into_diagnostic()?;
	let config = knuffel::parse(path, &config_file_contents)?;
	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use tedx_registration_shared::config::{DEFAULT_REGISTRATION_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_MS};

	#[test]
	fn full_document() {
		let text = r#"
listen "0.0.0.0:8000"
static-dir "client/dist"
client {
	event-name "TEDxNUST"
	registration-endpoint "https://api.example.org/register"
	request-timeout-ms 15000
	form-variant "application"
	max-upload-bytes 5242880
}
"#;
		let config: ConfigDocument = knuffel::parse("config.kdl", text).unwrap();
		assert_eq!(config.listen_address(), "0.0.0.0:8000");
		assert_eq!(config.static_dir(), "client/dist");

		let client = config.client_config().unwrap();
		assert_eq!(client.event_name, "TEDxNUST");
		assert_eq!(client.registration_endpoint, "https://api.example.org/register");
		assert_eq!(client.request_timeout_ms, 15000);
		assert_eq!(client.form_variant, FormVariant::Application);
		assert_eq!(client.max_upload_bytes, Some(5_242_880));
	}

	#[test]
	fn empty_document_uses_defaults() {
		let config: ConfigDocument = knuffel::parse("config.kdl", "").unwrap();
		assert_eq!(config.listen_address(), DEFAULT_LISTEN_ADDRESS);
		assert_eq!(config.static_dir(), DEFAULT_STATIC_DIR);
		let client = config.client_config().unwrap();
		assert_eq!(client.registration_endpoint, DEFAULT_REGISTRATION_ENDPOINT);
		assert_eq!(client.request_timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
		assert_eq!(client.form_variant, FormVariant::Registration);
		assert_eq!(client.max_upload_bytes, None);
	}

	#[test]
	fn unknown_form_variant_is_rejected() {
		let text = "client {\n\tform-variant \"survey\"\n}\n";
		let config: ConfigDocument = knuffel::parse("config.kdl", text).unwrap();
		assert!(config.client_config().is_err());
	}
}
