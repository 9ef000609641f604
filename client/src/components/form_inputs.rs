// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::registration_dialog::FileDisplay;
use crate::files::BrowserFile;
use std::collections::BTreeMap;
use sycamore::prelude::*;
use tedx_registration_shared::schema::{FieldDescriptor, FieldKind, FileDescriptor, FileSlot, InputId};
use tedx_registration_shared::validation::FieldErrorSet;
use wasm_bindgen::JsCast;
use web_sys::{Event as WebEvent, HtmlSelectElement};

fn error_text<'a, G: Html>(ctx: Scope<'a>, message: &'a ReadSignal<Option<String>>) -> View<G> {
	view! {
		ctx,
		(match (*message.get()).clone() {
			Some(message) => view! { ctx, span(class="input_error") { (message) } },
			None => view! { ctx, },
		})
	}
}

#[derive(Prop)]
pub struct FieldInputProps<'a> {
	field: FieldDescriptor,
	value: &'a Signal<String>,
	errors: &'a ReadSignal<FieldErrorSet>,
}

/// A labelled text, choice, or date input for one field of the form, with its error message.
#[component]
pub fn FieldInput<'a, G: Html>(ctx: Scope<'a>, props: FieldInputProps<'a>) -> View<G> {
	let value = props.value;
	let errors = props.errors;
	let key = props.field.key;
	let label = props.field.label;
	let placeholder = props.field.placeholder;
	let required_marker = if props.field.required { " *" } else { "" };

	let input_id = format!("registration_{}", key.name());
	let label_for = input_id.clone();
	let error_message = create_memo(ctx, move || errors.get().get(InputId::Field(key)).map(String::from));
	let error_class = create_memo(ctx, move || if error_message.get().is_some() { "error" } else { "" });

	let control = match props.field.kind {
		FieldKind::LongText => view! {
			ctx,
			textarea(id=input_id, rows=4, placeholder=placeholder, class=*error_class.get(), bind:value=value)
		},
		FieldKind::Radio(choices) => {
			let buttons = View::new_fragment(
				choices
					.iter()
					.map(|choice| {
						let choice: &'static str = *choice;
						let group_name = input_id.clone();
						view! {
							ctx,
							label(class="radio_choice") {
								input(
									type="radio",
									name=group_name,
									value=choice,
									checked=*value.get() == choice,
									on:change=move |_event: WebEvent| value.set(choice.to_string())
								)
								(choice)
							}
						}
					})
					.collect(),
			);
			view! {
				ctx,
				div(id=input_id, class=format!("radio_group {}", *error_class.get())) { (buttons) }
			}
		}
		FieldKind::Select(choices) => {
			let choice_views = View::new_fragment(
				choices
					.iter()
					.map(|choice| {
						let choice: &'static str = *choice;
						view! {
							ctx,
							option(value=choice, selected=*value.get() == choice) { (choice) }
						}
					})
					.collect(),
			);
			let change_handler = move |event: WebEvent| {
				let select = event
					.target()
					.and_then(|target| target.dyn_into::<HtmlSelectElement>().ok());
				if let Some(select) = select {
					value.set(select.value());
				}
			};
			view! {
				ctx,
				select(id=input_id, class=*error_class.get(), on:change=change_handler) {
					option(value="") { "Select an option" }
					(choice_views)
				}
			}
		}
		kind => {
			let input_type = match kind {
				FieldKind::Email => "email",
				FieldKind::Tel => "tel",
				FieldKind::Date => "date",
				FieldKind::Url => "url",
				_ => "text",
			};
			view! {
				ctx,
				input(id=input_id, type=input_type, placeholder=placeholder, class=*error_class.get(), bind:value=value)
			}
		}
	};

	view! {
		ctx,
		div(class="input_with_message registration_field") {
			label(for=label_for) { (label) (required_marker) }
			(control)
			(error_text(ctx, error_message))
		}
	}
}

#[derive(Prop)]
pub struct FileInputProps<'a> {
	file: FileDescriptor,
	files: &'a ReadSignal<BTreeMap<FileSlot, FileDisplay>>,
	errors: &'a ReadSignal<FieldErrorSet>,
	on_select: &'a dyn Fn(FileSlot, Option<BrowserFile>),
}

/// A file picker for one upload slot, showing the chosen file and its preview.
#[component]
pub fn FileInput<'a, G: Html>(ctx: Scope<'a>, props: FileInputProps<'a>) -> View<G> {
	let slot = props.file.slot;
	let label = props.file.label;
	let accept = props.file.accept;
	let required_marker = if props.file.required { " *" } else { "" };
	let files = props.files;
	let errors = props.errors;
	let on_select = props.on_select;

	let input_id = format!("registration_{}", slot.name());
	let label_for = input_id.clone();
	let chosen = create_memo(ctx, move || files.get().get(&slot).cloned());
	let error_message = create_memo(ctx, move || errors.get().get(InputId::File(slot)).map(String::from));
	let error_class = create_memo(ctx, move || if error_message.get().is_some() { "error" } else { "" });

	let change_handler = move |event: WebEvent| {
		on_select(slot, BrowserFile::from_change_event(&event));
	};

	view! {
		ctx,
		div(class="input_with_message registration_file") {
			label(for=label_for) { (label) (required_marker) }
			input(id=input_id, type="file", accept=accept, class=*error_class.get(), on:change=change_handler)
			(match (*chosen.get()).clone() {
				Some(FileDisplay { name, preview_url: Some(url) }) => view! {
					ctx,
					div(class="file_selection") {
						img(class="file_preview", src=url, alt=label)
						span(class="file_name") { (name) }
					}
				},
				Some(FileDisplay { name, preview_url: None }) => view! {
					ctx,
					div(class="file_selection") {
						span(class="file_name") { (name) }
					}
				},
				None => view! { ctx, },
			})
			(error_text(ctx, error_message))
		}
	}
}
