// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use async_std::path::PathBuf;
use clap::Parser;
use miette::{IntoDiagnostic, Result};

mod args;
use args::CliArgs;

mod config;
use config::parse_config;

mod file_types;

mod web;
use web::build_app;

#[async_std::main]
async fn main() -> Result<()> {
	let args = CliArgs::parse();
	let config = parse_config(&args.config)?;
	let client_config = config.client_config()?;

	tide::log::start();

	let listen_address = args
		.listen
		.unwrap_or_else(|| String::from(config.listen_address()));
	tide::log::info!(
		"Serving {} from {} with registrations going to {}",
		client_config.event_name,
		config.static_dir(),
		client_config.registration_endpoint
	);

	let app = build_app(client_config, PathBuf::from(config.static_dir()));
	app.listen(listen_address).await.into_diagnostic()?;

	Ok(())
}
