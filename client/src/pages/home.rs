// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::app::DialogSignals;
use crate::page_utils::set_page_title;
use sycamore::futures::spawn_local_scoped;
use sycamore::prelude::*;
use tedx_registration_shared::config::ClientConfig;
use web_sys::Event as WebEvent;

#[derive(Prop)]
pub struct HomeProps {
	/// Opens the registration dialog as soon as the page shows
	open_on_load: bool,
}

#[component]
pub fn HomeView<G: Html>(ctx: Scope<'_>, props: HomeProps) -> View<G> {
	let config: &ClientConfig = use_context(ctx);
	let dialog: &DialogSignals = use_context(ctx);

	set_page_title(&config.event_name);

	if props.open_on_load {
		spawn_local_scoped(ctx, async move {
			log::debug!("Opening the registration dialog from the page address");
			dialog.open.set(true);
		});
	}

	let register_handler = move |_event: WebEvent| {
		dialog.notice.set(None);
		dialog.open.set(true);
	};

	view! {
		ctx,
		main(id="home") {
			section(id="hero") {
				h1 { (config.event_name.clone()) }
				p(id="hero_tagline") { "Ideas worth spreading." }
				button(id="hero_register", type="button", on:click=register_handler) { "Register" }
			}
		}
	}
}
