// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use app::App;
use config::load_client_config;
use sycamore::futures::spawn_local;
use sycamore::prelude::*;

mod app;
mod components;
mod config;
mod error;
mod files;
mod page_utils;
mod pages;
mod transport;

fn main() {
	console_error_panic_hook::set_once();
	wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

	spawn_local(async {
		let config = load_client_config().await;
		log::info!("Starting {} registration ({:?} form)", config.event_name, config.form_variant);
		sycamore::render(|ctx| {
			provide_context(ctx, config);
			view! { ctx, App }
		});
	});
}
