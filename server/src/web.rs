// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::file_types::get_media_type;
use async_std::fs;
use async_std::io::ErrorKind;
use async_std::path::PathBuf;
use async_std::sync::Arc;
use http_types::mime;
use tedx_registration_shared::config::ClientConfig;
use tide::{Request, Response, Server, StatusCode};

/// Sets up the routes for the host: the client configuration and the static client files.
pub fn build_app(client_config: ClientConfig, static_dir: PathBuf) -> Server<()> {
	let mut app = tide::new();
	let client_config = Arc::new(client_config);
	let static_dir = Arc::new(static_dir);

	app.at("/config.json").get({
		let client_config = Arc::clone(&client_config);
		move |request| serve_client_config(request, Arc::clone(&client_config))
	});
	app.at("/").get({
		let static_dir = Arc::clone(&static_dir);
		move |request| serve_static_file(request, Arc::clone(&static_dir))
	});
	app.at("/*path").get({
		let static_dir = Arc::clone(&static_dir);
		move |request| serve_static_file(request, Arc::clone(&static_dir))
	});

	app
}

/// GET /config.json
///
/// Responds with the [ClientConfig] the browser client runs with.
async fn serve_client_config(_request: Request<()>, client_config: Arc<ClientConfig>) -> tide::Result {
	match serde_json::to_string(&*client_config) {
		Ok(config_data) => Ok(Response::builder(StatusCode::Ok)
			.body(config_data)
			.content_type(mime::JSON)
			.build()),
		Err(error) => {
			tide::log::error!("Failed to serialize the client configuration: {}", error);
			Err(tide::Error::new(
				StatusCode::InternalServerError,
				anyhow::Error::msg("Failed to generate response"),
			))
		}
	}
}

/// Serves a file from the static directory. Paths with no file extension that don't exist are
/// client routes, so they get the client's index page.
async fn serve_static_file(request: Request<()>, static_dir: Arc<PathBuf>) -> tide::Result {
	let request_path = request.url().path();
	// The URL parser has already resolved any `..` segments against the root.
	let relative_path = request_path.trim_start_matches('/');
	let mut file_path = static_dir.join(relative_path);
	if file_path.is_dir().await {
		file_path.push("index.html");
	} else if file_path.extension().is_none() && !file_path.is_file().await {
		file_path = static_dir.join("index.html");
	}

	match fs::read(&file_path).await {
		Ok(contents) => Ok(Response::builder(StatusCode::Ok)
			.body(contents)
			.content_type(get_media_type(&file_path))
			.build()),
		Err(error) => match error.kind() {
			ErrorKind::NotFound => Ok(Response::new(StatusCode::NotFound)),
			ErrorKind::PermissionDenied => Ok(Response::new(StatusCode::Forbidden)),
			_ => {
				tide::log::warn!("Failed to read {}: {}", file_path.display(), error);
				Ok(Response::new(StatusCode::InternalServerError))
			}
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http_types::{Method, Url};
	use tedx_registration_shared::schema::FormVariant;

	async fn static_fixture(name: &str) -> PathBuf {
		let dir = PathBuf::from(std::env::temp_dir()).join(format!("tedx-registration-{}-{}", name, std::process::id()));
		fs::create_dir_all(&dir).await.unwrap();
		fs::write(dir.join("index.html"), "<!DOCTYPE html><title>TEDx</title>").await.unwrap();
		fs::write(dir.join("client.js"), "export default function init() {}").await.unwrap();
		dir
	}

	async fn get(app: &Server<()>, path: &str) -> http_types::Response {
		let url = Url::parse("http://localhost/").unwrap().join(path).unwrap();
		let request = http_types::Request::new(Method::Get, url);
		app.respond(request).await.unwrap()
	}

	#[async_std::test]
	async fn config_is_served_as_json() {
		let config = ClientConfig {
			event_name: String::from("TEDxNUST"),
			form_variant: FormVariant::Application,
			..ClientConfig::default()
		};
		let app = build_app(config.clone(), static_fixture("config").await);

		let mut response = get(&app, "/config.json").await;
		assert_eq!(response.status(), StatusCode::Ok);
		let content_type = response.content_type().map(|media_type| media_type.essence().to_string());
		assert_eq!(content_type.as_deref(), Some("application/json"));
		let body = response.body_string().await.unwrap();
		let served: ClientConfig = serde_json::from_str(&body).unwrap();
		assert_eq!(served, config);
	}

	#[async_std::test]
	async fn static_files_and_client_routes() {
		let app = build_app(ClientConfig::default(), static_fixture("static").await);

		let mut index = get(&app, "/").await;
		assert_eq!(index.status(), StatusCode::Ok);
		assert!(index.body_string().await.unwrap().contains("<title>TEDx</title>"));

		let script = get(&app, "/client.js").await;
		assert_eq!(script.status(), StatusCode::Ok);
		assert_eq!(script.header("Content-Type").map(|value| value.last().as_str()), Some("text/javascript"));

		let mut register = get(&app, "/register").await;
		assert_eq!(register.status(), StatusCode::Ok);
		assert!(register.body_string().await.unwrap().contains("<title>TEDx</title>"));

		let missing = get(&app, "/missing.wasm").await;
		assert_eq!(missing.status(), StatusCode::NotFound);
	}
}
