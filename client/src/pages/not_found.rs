// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::page_utils::set_page_title;
use sycamore::prelude::*;
use tedx_registration_shared::config::ClientConfig;

#[component]
pub fn NotFoundView<G: Html>(ctx: Scope<'_>) -> View<G> {
	let config: &ClientConfig = use_context(ctx);
	log::debug!("Activating fallback page for unknown location");
	set_page_title(&format!("Page not found | {}", config.event_name));

	view! {
		ctx,
		main(id="not_found") {
			h1 { "Page not found" }
			p { "There's no page at this address." }
			p {
				a(href="/") { "Back to " (config.event_name.clone()) }
			}
		}
	}
}
