// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ClientError;
use gloo_net::http::Request;
use tedx_registration_shared::config::ClientConfig;
use web_sys::Url;

/// Gets the URL of the configuration document on the host serving this page.
pub fn config_endpoint() -> Result<String, ClientError> {
	let window = web_sys::window().ok_or(ClientError::NoBrowserContext)?;
	let page_address = window.location().href()?;
	let url = Url::new(&page_address)?;
	url.set_search("");
	url.set_hash("");
	url.set_pathname("/config.json");
	Ok(url.to_string().into())
}

async fn fetch_client_config() -> Result<ClientConfig, ClientError> {
	let endpoint = config_endpoint()?;
	let response = Request::get(&endpoint).send().await?;
	if !response.ok() {
		return Err(ClientError::Status(response.status()));
	}
	let body = response.text().await?;
	Ok(serde_json::from_str(&body)?)
}

/// Loads the runtime configuration, falling back to the built-in defaults when the host doesn't
/// provide one.
pub async fn load_client_config() -> ClientConfig {
	match fetch_client_config().await {
		Ok(config) => {
			log::debug!("Loaded client configuration: {:?}", config);
			config
		}
		Err(error) => {
			log::warn!("Using the default configuration; couldn't load /config.json: {}", error);
			ClientConfig::default()
		}
	}
}
