// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::draft::{RegistrantDraft, SelectedFile};
use crate::schema::FormSchema;
use futures::future::{select, Either};
use futures::pin_mut;
use serde::Deserialize;
use std::future::Future;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// One value of the multipart body
#[derive(Clone, Debug, PartialEq)]
pub enum PayloadValue<F> {
	Text(String),
	File(F),
}

/// The multipart body sent to the registration endpoint, in schema order.
#[derive(Clone, Debug)]
pub struct SubmissionPayload<F> {
	parts: Vec<(&'static str, PayloadValue<F>)>,
}

impl<F: SelectedFile> SubmissionPayload<F> {
	/// Builds the payload for every input of the schema. Optional text fields are sent empty;
	/// optional file slots left empty are omitted.
	pub fn from_draft(schema: &FormSchema, draft: &RegistrantDraft<F>) -> Self {
		let mut parts = Vec::new();
		for field in schema.fields() {
			parts.push((field.wire_key, PayloadValue::Text(draft.value(field.key).trim().to_string())));
		}
		for file in schema.files() {
			if let Some(selected) = draft.file(file.slot) {
				parts.push((file.wire_key, PayloadValue::File(selected.clone())));
			}
		}
		Self { parts }
	}
}

impl<F> SubmissionPayload<F> {
	pub fn parts(&self) -> &[(&'static str, PayloadValue<F>)] {
		&self.parts
	}

	pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.parts.iter().map(|(key, _)| *key)
	}

	pub fn text(&self, key: &str) -> Option<&str> {
		self.parts.iter().find_map(|(part_key, value)| match value {
			PayloadValue::Text(text) if *part_key == key => Some(text.as_str()),
			_ => None,
		})
	}

	pub fn file(&self, key: &str) -> Option<&F> {
		self.parts.iter().find_map(|(part_key, value)| match value {
			PayloadValue::File(file) if *part_key == key => Some(file),
			_ => None,
		})
	}
}

/// What happened to one submission request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionOutcome {
	/// The server confirmed the registration
	Accepted { message: Option<String> },
	/// The server answered with a non-success status
	Rejected { status: u16, message: Option<String> },
	/// The request never produced a response (connection failure, timeout)
	NetworkError(String),
}

impl fmt::Display for SubmissionOutcome {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Accepted { message: Some(message) } => write!(f, "{}", message),
			Self::Accepted { message: None } => write!(f, "Registration successful"),
			Self::Rejected {
				message: Some(message), ..
			} => write!(f, "{}", message),
			Self::Rejected { status, message: None } => {
				write!(f, "The registration server responded with status {}", status)
			}
			Self::NetworkError(reason) => write!(f, "Couldn't reach the registration server: {}", reason),
		}
	}
}

impl SubmissionOutcome {
	/// The outcome of a request that didn't finish before its deadline.
	pub fn timed_out(timeout_ms: u32) -> Self {
		Self::NetworkError(format!("no complete response within {} ms", timeout_ms))
	}
}

#[derive(Deserialize)]
struct ServerMessage {
	message: Option<String>,
}

/// Interprets the status and body of a registration response. Any 2xx status is a success; a
/// JSON body with a `message` string supplies the text shown to the user.
pub fn interpret_response(status: u16, body: &str) -> SubmissionOutcome {
	let message = serde_json::from_str::<ServerMessage>(body)
		.ok()
		.and_then(|response| response.message)
		.filter(|message| !message.trim().is_empty());
	if (200..300).contains(&status) {
		SubmissionOutcome::Accepted { message }
	} else {
		SubmissionOutcome::Rejected { status, message }
	}
}

/// Runs a whole request exchange, from sending through reading the body, against a deadline.
/// Returns `None` when the deadline passes first; the exchange is dropped at that point.
pub async fn with_deadline<T>(exchange: impl Future<Output = T>, deadline: impl Future<Output = ()>) -> Option<T> {
	pin_mut!(exchange, deadline);
	match select(exchange, deadline).await {
		Either::Left((result, _)) => Some(result),
		Either::Right(((), _)) => None,
	}
}

/// Sends a registration payload to the remote endpoint. Implementations make exactly one attempt.
#[allow(async_fn_in_trait)]
pub trait RegistrationTransport<F> {
	async fn send(&self, payload: &SubmissionPayload<F>) -> SubmissionOutcome;
}

/// Tracks whether a submission request is in flight.
#[derive(Clone, Debug, Default)]
pub struct SubmissionLock {
	in_flight: Rc<Cell<bool>>,
}

impl SubmissionLock {
	pub fn new() -> Self {
		Self::default()
	}

	/// Claims the lock, or returns `None` if a submission is already running. The lock is held
	/// until the returned guard is dropped.
	pub fn try_acquire(&self) -> Option<SubmissionGuard> {
		if self.in_flight.replace(true) {
			return None;
		}
		Some(SubmissionGuard {
			in_flight: Rc::clone(&self.in_flight),
		})
	}

	pub fn is_held(&self) -> bool {
		self.in_flight.get()
	}
}

#[derive(Debug)]
pub struct SubmissionGuard {
	in_flight: Rc<Cell<bool>>,
}

impl Drop for SubmissionGuard {
	fn drop(&mut self) {
		self.in_flight.set(false);
	}
}
