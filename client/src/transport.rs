// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::error::ClientError;
use crate::files::BrowserFile;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use tedx_registration_shared::draft::SelectedFile;
use tedx_registration_shared::submission::{
	interpret_response, with_deadline, PayloadValue, RegistrationTransport, SubmissionOutcome, SubmissionPayload,
};
use web_sys::{AbortController, FormData};

/// Posts registrations as `multipart/form-data` to the configured endpoint.
pub struct HttpTransport {
	endpoint: String,
	timeout_ms: u32,
	in_flight: RefCell<Option<AbortController>>,
}

impl HttpTransport {
	pub fn new(endpoint: String, timeout_ms: u32) -> Self {
		Self {
			endpoint,
			timeout_ms,
			in_flight: RefCell::new(None),
		}
	}

	/// Cancels the request in flight, if any.
	pub fn abort(&self) {
		if let Some(controller) = self.in_flight.borrow_mut().take() {
			log::debug!("Aborting registration request to {}", self.endpoint);
			controller.abort();
		}
	}
}

fn build_form_data(payload: &SubmissionPayload<BrowserFile>) -> Result<FormData, ClientError> {
	let form_data = FormData::new()?;
	for (key, value) in payload.parts() {
		match value {
			PayloadValue::Text(text) => form_data.append_with_str(key, text)?,
			PayloadValue::File(file) => {
				form_data.append_with_blob_and_filename(key, file.as_file(), &file.file_name())?
			}
		}
	}
	Ok(form_data)
}

impl RegistrationTransport<BrowserFile> for HttpTransport {
	async fn send(&self, payload: &SubmissionPayload<BrowserFile>) -> SubmissionOutcome {
		let form_data = match build_form_data(payload) {
			Ok(data) => data,
			Err(error) => return SubmissionOutcome::NetworkError(error.to_string()),
		};
		let controller = match AbortController::new() {
			Ok(controller) => controller,
			Err(error) => return SubmissionOutcome::NetworkError(ClientError::from(error).to_string()),
		};
		let signal = controller.signal();
		*self.in_flight.borrow_mut() = Some(controller);

		// The browser sets the multipart boundary itself, so no Content-Type header is set here.
		let request = match Request::post(&self.endpoint)
			.abort_signal(Some(&signal))
			.body(form_data)
		{
			Ok(request) => request,
			Err(error) => {
				self.in_flight.borrow_mut().take();
				return SubmissionOutcome::NetworkError(error.to_string());
			}
		};

		log::info!("Submitting registration to {}", self.endpoint);
		let exchange = async {
			let response = request.send().await?;
			let status = response.status();
			let body = match response.text().await {
				Ok(body) => body,
				Err(error) => {
					log::warn!("Failed to read the registration response body (status {}): {}", status, error);
					String::new()
				}
			};
			Ok::<_, gloo_net::Error>(interpret_response(status, &body))
		};

		let outcome = match with_deadline(exchange, TimeoutFuture::new(self.timeout_ms)).await {
			Some(Ok(outcome)) => outcome,
			Some(Err(error)) => SubmissionOutcome::NetworkError(error.to_string()),
			None => {
				self.abort();
				SubmissionOutcome::timed_out(self.timeout_ms)
			}
		};
		self.in_flight.borrow_mut().take();
		log::debug!("Registration request finished: {:?}", outcome);
		outcome
	}
}
