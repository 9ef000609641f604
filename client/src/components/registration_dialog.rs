// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::form_inputs::{FieldInput, FileInput};
use crate::app::DialogSignals;
use crate::files::{BrowserFile, ObjectUrlPreviews};
use crate::transport::HttpTransport;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use sycamore::futures::spawn_local_scoped;
use sycamore::prelude::*;
use tedx_registration_shared::config::ClientConfig;
use tedx_registration_shared::draft::SelectedFile;
use tedx_registration_shared::schema::{FieldKey, FileSlot, FormSchema};
use tedx_registration_shared::session::{RegistrationSession, SubmissionResolution, SubmissionStatus};
use tedx_registration_shared::submission::RegistrationTransport;
use tedx_registration_shared::validation::FieldErrorSet;
use web_sys::Event as WebEvent;

type BrowserSession = RegistrationSession<BrowserFile, ObjectUrlPreviews>;

/// Per-slot display data for chosen files
#[derive(Clone, Default, PartialEq)]
pub struct FileDisplay {
	pub name: String,
	pub preview_url: Option<String>,
}

#[component]
pub fn RegistrationDialog<G: Html>(ctx: Scope<'_>) -> View<G> {
	let config: &ClientConfig = use_context(ctx);
	let dialog: &DialogSignals = use_context(ctx);

	let schema = FormSchema::for_variant(config.form_variant);
	let session: &RefCell<BrowserSession> = create_ref(
		ctx,
		RefCell::new(RegistrationSession::new(
			schema.clone(),
			ObjectUrlPreviews,
			config.upload_limits(),
		)),
	);
	session.borrow_mut().open();
	let schema = create_ref(ctx, schema);
	let transport = create_ref(
		ctx,
		HttpTransport::new(config.registration_endpoint.clone(), config.request_timeout_ms),
	);

	let step = create_signal(ctx, 1usize);
	let current_step = create_selector(ctx, move || *step.get());
	let errors = create_signal(ctx, FieldErrorSet::new());
	let files = create_signal(ctx, BTreeMap::<FileSlot, FileDisplay>::new());
	let status = create_signal(ctx, SubmissionStatus::Idle);
	let progress = create_signal(ctx, 0.0f64);

	// Copies the parts of the session the view shows into signals.
	let sync = move || {
		let session = session.borrow();
		step.set(session.step());
		progress.set(session.navigator().progress());
		errors.set(session.errors().clone());
		status.set(session.status().clone());
		let file_displays: BTreeMap<FileSlot, FileDisplay> = FileSlot::ALL
			.iter()
			.filter_map(|slot| {
				session.draft().file(*slot).map(|file| {
					let display = FileDisplay {
						name: file.file_name(),
						preview_url: session.preview(*slot).cloned(),
					};
					(*slot, display)
				})
			})
			.collect();
		files.set(file_displays);
	};

	let mut values: HashMap<FieldKey, &Signal<String>> = HashMap::new();
	for field in schema.fields() {
		let key = field.key;
		let value = create_signal(ctx, String::new());
		create_effect(ctx, move || {
			let text = (*value.get()).clone();
			session.borrow_mut().set_field(key, text);
			sync();
		});
		values.insert(key, value);
	}
	let values = create_ref(ctx, values);

	let select_file: &dyn Fn(FileSlot, Option<BrowserFile>) =
		create_ref(ctx, move |slot: FileSlot, file: Option<BrowserFile>| {
			session.borrow_mut().select_file(slot, file);
			sync();
		});

	on_cleanup(ctx, move || {
		transport.abort();
		session.borrow_mut().close();
	});

	let close_dialog = move || {
		transport.abort();
		session.borrow_mut().close();
		dialog.open.set(false);
	};
	let close_handler = move |_event: WebEvent| close_dialog();
	let overlay_handler = move |_event: WebEvent| close_dialog();
	// Clicks inside the dialog don't reach the overlay.
	let dialog_click_handler = |event: WebEvent| event.stop_propagation();

	let previous_handler = move |_event: WebEvent| {
		session.borrow_mut().retreat();
		sync();
	};

	let next_handler = move |_event: WebEvent| {
		let advanced = session.borrow_mut().advance();
		if let Err(errors) = advanced {
			log::debug!("Step has {} invalid entries", errors.len());
		}
		sync();
	};

	let submit_handler = move |event: WebEvent| {
		event.prevent_default();

		let begun = session.borrow_mut().begin_submit();
		let ticket = match begun {
			Ok(ticket) => ticket,
			Err(rejected) => {
				log::debug!("Registration not submitted: {}", rejected);
				sync();
				return;
			}
		};
		sync();

		spawn_local_scoped(ctx, async move {
			let outcome = transport.send(ticket.payload()).await;
			let resolution = session.borrow_mut().finish_submit(ticket, outcome);
			match resolution {
				SubmissionResolution::Completed { message } => {
					dialog.notice.set(Some(message));
					dialog.open.set(false);
				}
				SubmissionResolution::Failed(_) => sync(),
				SubmissionResolution::Discarded => (),
			}
		});
	};

	let step_count = schema.step_count();
	let progress_segments = View::new_fragment(
		schema
			.steps()
			.iter()
			.enumerate()
			.map(|(index, step_descriptor)| {
				let position = index + 1;
				let title = step_descriptor.title;
				view! {
					ctx,
					span(class=if *current_step.get() >= position { "registration_progress_step registration_progress_step_reached" } else { "registration_progress_step" }) {
						(title)
					}
				}
			})
			.collect(),
	);
	let progress_width = create_memo(ctx, move || format!("width: {:.0}%", *progress.get() * 100.0));

	// Rebuilt in its own scope whenever the step changes so the inputs of the old step are disposed.
	let step_body = View::new_dyn_scoped(ctx, move |ctx| {
		let position = *current_step.get();
		let Some(step_descriptor) = schema.step(position) else {
			return view! { ctx, };
		};
		let field_views = View::new_fragment(
			step_descriptor
				.fields
				.iter()
				.filter_map(|field| {
					values.get(&field.key).map(|value| {
						let field = field.clone();
						view! { ctx, FieldInput(field=field, value=*value, errors=errors) }
					})
				})
				.collect(),
		);
		let file_views = View::new_fragment(
			step_descriptor
				.files
				.iter()
				.map(|file| {
					let file = file.clone();
					view! { ctx, FileInput(file=file, files=files, errors=errors, on_select=select_file) }
				})
				.collect(),
		);
		let title = step_descriptor.title;
		view! {
			ctx,
			fieldset(class="registration_step") {
				legend { (title) }
				(field_views)
				(file_views)
			}
		}
	});

	let submitting = create_memo(ctx, move || *status.get() == SubmissionStatus::Submitting);
	let failure_message = create_memo(ctx, move || match &*status.get() {
		SubmissionStatus::Failed(outcome) => Some(outcome.to_string()),
		_ => None,
	});

	view! {
		ctx,
		div(id="registration_overlay", on:click=overlay_handler) {
			div(id="registration_dialog", role="dialog", on:click=dialog_click_handler) {
				div(id="registration_dialog_header") {
					h2 { "Register for " (config.event_name.clone()) }
					button(id="registration_close", type="button", on:click=close_handler) { "×" }
				}
				div(id="registration_progress") {
					div(id="registration_progress_labels") { (progress_segments) }
					div(id="registration_progress_track") {
						div(id="registration_progress_bar", style=(*progress_width.get()).clone())
					}
				}
				form(id="registration_form", on:submit=submit_handler) {
					(step_body)
					(
						if let Some(message) = (*failure_message.get()).clone() {
							view! {
								ctx,
								div(id="registration_failure", role="alert") {
									p { "Your registration wasn't submitted." }
									p(class="registration_failure_reason") { (message) }
									p { "Check your connection and press Submit to try again." }
								}
							}
						} else {
							view! { ctx, }
						}
					)
					(
						if *current_step.get() == step_count {
							view! {
								ctx,
								p(id="registration_terms") { "By submitting this form, you accept the terms and conditions." }
							}
						} else {
							view! { ctx, }
						}
					)
					div(id="registration_actions") {
						(
							if *current_step.get() > 1 {
								view! {
									ctx,
									button(type="button", disabled=*submitting.get(), on:click=previous_handler) { "Previous" }
								}
							} else {
								view! { ctx, }
							}
						)
						(
							if *current_step.get() < step_count {
								view! {
									ctx,
									button(type="button", on:click=next_handler) { "Next" }
								}
							} else {
								view! {
									ctx,
									button(type="submit", disabled=*submitting.get()) {
										(if *submitting.get() { "Submitting…" } else { "Submit" })
									}
								}
							}
						)
					}
				}
			}
		}
	}
}
