// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::components::registration_dialog::RegistrationDialog;
use crate::pages::home::HomeView;
use crate::pages::not_found::NotFoundView;
use sycamore::prelude::*;
use sycamore_router::{HistoryIntegration, Route, Router};
use web_sys::Event as WebEvent;

/// Page-wide state shared between the pages and the registration dialog
#[derive(Clone)]
pub struct DialogSignals {
	/// Whether the registration dialog is showing
	pub open: RcSignal<bool>,
	/// A confirmation to show on the page after the dialog closes
	pub notice: RcSignal<Option<String>>,
}

impl Default for DialogSignals {
	fn default() -> Self {
		Self {
			open: create_rc_signal(false),
			notice: create_rc_signal(None),
		}
	}
}

#[derive(Route)]
pub enum AppRoutes {
	#[to("/")]
	Home,
	#[to("/register")]
	Register,
	#[not_found]
	NotFound,
}

#[component]
pub fn App<G: Html>(ctx: Scope<'_>) -> View<G> {
	let dialog = provide_context(ctx, DialogSignals::default());

	let open = dialog.open.clone();
	// The dialog gets a fresh scope each time it opens, and the scope is disposed when it closes.
	let dialog_view = View::new_dyn_scoped(ctx, move |ctx| {
		if *open.get() {
			view! { ctx, RegistrationDialog }
		} else {
			view! { ctx, }
		}
	});

	let notice = dialog.notice.clone();
	let notice_view = View::new_dyn_scoped(ctx, move |ctx| match (*notice.get()).clone() {
		Some(message) => {
			let notice = notice.clone();
			let dismiss_handler = move |_event: WebEvent| notice.set(None);
			view! {
				ctx,
				div(id="registration_notice", role="status") {
					p { (message) }
					button(type="button", on:click=dismiss_handler) { "Dismiss" }
				}
			}
		}
		None => view! { ctx, },
	});

	view! {
		ctx,
		Router(
			integration=HistoryIntegration::new(),
			view=|ctx, route: &ReadSignal<AppRoutes>| {
				view! {
					ctx,
					(match route.get().as_ref() {
						AppRoutes::Home => view! { ctx, HomeView(open_on_load=false) },
						AppRoutes::Register => view! { ctx, HomeView(open_on_load=true) },
						AppRoutes::NotFound => view! { ctx, NotFoundView },
					})
				}
			}
		)
		(notice_view)
		(dialog_view)
	}
}
