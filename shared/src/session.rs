// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The registration dialog's state, independent of how it's rendered.

use crate::draft::{RegistrantDraft, SelectedFile};
use crate::preview::{PreviewBackend, PreviewManager};
use crate::schema::{FieldKey, FileSlot, FormSchema};
use crate::submission::{
	RegistrationTransport, SubmissionGuard, SubmissionLock, SubmissionOutcome, SubmissionPayload,
};
use crate::validation::{earliest_failing_step, step_inputs, validate_all, FieldErrorSet, UploadLimits};
use crate::wizard::StepNavigator;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DialogState {
	Closed,
	Open,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionStatus {
	Idle,
	Submitting,
	/// The last attempt didn't go through; the draft is kept so it can be retried
	Failed(SubmissionOutcome),
}

/// Reasons a submission was refused before any request was made.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmitRejected {
	DialogClosed,
	NotOnLastStep,
	/// Validation failed; the wizard moved to this step
	Invalid { step: usize },
	InFlight,
}

impl fmt::Display for SubmitRejected {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DialogClosed => write!(f, "The registration form isn't open"),
			Self::NotOnLastStep => write!(f, "The registration form can only be submitted from its last step"),
			Self::Invalid { step } => write!(f, "Some entries on step {} need attention", step),
			Self::InFlight => write!(f, "A registration is already being submitted"),
		}
	}
}

impl std::error::Error for SubmitRejected {}

/// A submission that passed local checks and holds the in-flight lock until it's finished.
pub struct SubmissionTicket<F> {
	generation: u64,
	payload: SubmissionPayload<F>,
	_guard: SubmissionGuard,
}

impl<F> SubmissionTicket<F> {
	pub fn payload(&self) -> &SubmissionPayload<F> {
		&self.payload
	}
}

/// What the dialog did with a submission outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionResolution {
	/// The registration went through and the dialog closed
	Completed { message: String },
	/// The registration didn't go through; the dialog stays open
	Failed(SubmissionOutcome),
	/// The dialog was closed or reopened while the request was running
	Discarded,
}

/// Owns everything one open registration dialog works with: the draft, its errors, file previews,
/// wizard position, and submission status.
pub struct RegistrationSession<F, B: PreviewBackend<F>> {
	schema: FormSchema,
	limits: UploadLimits,
	state: DialogState,
	draft: RegistrantDraft<F>,
	errors: FieldErrorSet,
	previews: PreviewManager<F, B>,
	navigator: StepNavigator,
	status: SubmissionStatus,
	lock: SubmissionLock,
	generation: u64,
}

impl<F: SelectedFile, B: PreviewBackend<F>> RegistrationSession<F, B> {
	/// Creates a closed session.
	pub fn new(schema: FormSchema, backend: B, limits: UploadLimits) -> Self {
		let navigator = StepNavigator::new(schema.step_count());
		Self {
			schema,
			limits,
			state: DialogState::Closed,
			draft: RegistrantDraft::new(),
			errors: FieldErrorSet::new(),
			previews: PreviewManager::new(backend),
			navigator,
			status: SubmissionStatus::Idle,
			lock: SubmissionLock::new(),
			generation: 0,
		}
	}

	pub fn schema(&self) -> &FormSchema {
		&self.schema
	}

	pub fn state(&self) -> DialogState {
		self.state
	}

	pub fn is_open(&self) -> bool {
		self.state == DialogState::Open
	}

	pub fn draft(&self) -> &RegistrantDraft<F> {
		&self.draft
	}

	pub fn errors(&self) -> &FieldErrorSet {
		&self.errors
	}

	pub fn status(&self) -> &SubmissionStatus {
		&self.status
	}

	pub fn is_submitting(&self) -> bool {
		self.lock.is_held()
	}

	pub fn step(&self) -> usize {
		self.navigator.current()
	}

	pub fn navigator(&self) -> &StepNavigator {
		&self.navigator
	}

	pub fn preview(&self, slot: FileSlot) -> Option<&B::Handle> {
		self.previews.handle(slot)
	}

	pub fn live_previews(&self) -> usize {
		self.previews.live_count()
	}

	/// Opens the dialog with a fresh draft on the first step. Opening an open dialog does nothing.
	pub fn open(&mut self) {
		if self.is_open() {
			return;
		}
		self.reset();
		self.state = DialogState::Open;
		log::debug!("Opened registration dialog ({} steps)", self.navigator.step_count());
	}

	/// Closes the dialog, releasing every preview and discarding the draft. Outcomes of requests
	/// still in flight are ignored once they arrive.
	pub fn close(&mut self) {
		if !self.is_open() {
			self.previews.release_all();
			return;
		}
		self.reset();
		self.state = DialogState::Closed;
		log::debug!("Closed registration dialog");
	}

	fn reset(&mut self) {
		self.previews.release_all();
		self.draft.clear();
		self.errors.clear();
		self.navigator.reset();
		self.status = SubmissionStatus::Idle;
		// A request from the previous generation keeps its own guard; it no longer blocks this one.
		self.lock = SubmissionLock::new();
		self.generation += 1;
	}

	/// Stores a field value, clearing only that field's error.
	pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>) {
		if !self.is_open() {
			return;
		}
		self.draft.set_value(key, value);
		self.errors.clear_input(key);
	}

	/// Stores a newly picked file for a slot and refreshes its preview. `None` means the picker was
	/// dismissed without a choice, which leaves the slot as it was.
	pub fn select_file(&mut self, slot: FileSlot, file: Option<F>) {
		if !self.is_open() {
			return;
		}
		let Some(file) = file else {
			return;
		};
		self.previews.install(slot, Some(&file));
		self.draft.set_file(slot, file);
		self.errors.clear_input(slot);
	}

	/// Moves to the next step if the current one validates.
	///
	/// # Errors
	///
	/// Returns the current step's errors (also stored in [`errors`](Self::errors)) and stays put.
	pub fn advance(&mut self) -> Result<usize, FieldErrorSet> {
		let covered = self
			.schema
			.step(self.navigator.current())
			.map(step_inputs)
			.unwrap_or_default();
		match self.navigator.advance(&self.schema, &self.draft, self.limits) {
			Ok(step) => {
				self.errors.replace_covered(&covered, FieldErrorSet::new());
				log::debug!("Advanced registration to step {}", step);
				Ok(step)
			}
			Err(errors) => {
				self.errors.replace_covered(&covered, errors.clone());
				Err(errors)
			}
		}
	}

	pub fn retreat(&mut self) -> usize {
		self.navigator.retreat()
	}

	/// Runs the local checks for a submission and claims the in-flight lock.
	///
	/// # Errors
	///
	/// Refuses when the dialog is closed, when not on the last step, when a submission is already
	/// running, or when validation fails. A validation failure stores the errors and moves the
	/// wizard to the earliest step with a failing input.
	pub fn begin_submit(&mut self) -> Result<SubmissionTicket<F>, SubmitRejected> {
		if !self.is_open() {
			return Err(SubmitRejected::DialogClosed);
		}
		if !self.navigator.is_last() {
			return Err(SubmitRejected::NotOnLastStep);
		}
		if self.lock.is_held() {
			return Err(SubmitRejected::InFlight);
		}

		let errors = validate_all(&self.schema, &self.draft, self.limits);
		if let Some(step) = earliest_failing_step(&self.schema, &errors) {
			self.errors = errors;
			let step = self.navigator.jump_to(step);
			log::debug!("Registration submission blocked by validation on step {}", step);
			return Err(SubmitRejected::Invalid { step });
		}

		let guard = self.lock.try_acquire().ok_or(SubmitRejected::InFlight)?;
		self.errors.clear();
		self.status = SubmissionStatus::Submitting;
		Ok(SubmissionTicket {
			generation: self.generation,
			payload: SubmissionPayload::from_draft(&self.schema, &self.draft),
			_guard: guard,
		})
	}

	/// Applies the outcome of a submission request, releasing its lock.
	pub fn finish_submit(&mut self, ticket: SubmissionTicket<F>, outcome: SubmissionOutcome) -> SubmissionResolution {
		let generation = ticket.generation;
		drop(ticket);

		if !self.is_open() || generation != self.generation {
			log::debug!("Discarding registration outcome for a closed dialog: {:?}", outcome);
			return SubmissionResolution::Discarded;
		}

		match outcome {
			SubmissionOutcome::Accepted { .. } => {
				let message = outcome.to_string();
				log::info!("Registration accepted: {}", message);
				self.close();
				SubmissionResolution::Completed { message }
			}
			failure => {
				log::warn!("Registration failed: {}", failure);
				self.status = SubmissionStatus::Failed(failure.clone());
				SubmissionResolution::Failed(failure)
			}
		}
	}

	/// Validates, sends, and applies the outcome of one submission.
	///
	/// # Errors
	///
	/// See [`begin_submit`](Self::begin_submit); no request is made in those cases.
	pub async fn submit<T: RegistrationTransport<F>>(
		&mut self,
		transport: &T,
	) -> Result<SubmissionResolution, SubmitRejected> {
		let ticket = self.begin_submit()?;
		let outcome = transport.send(ticket.payload()).await;
		Ok(self.finish_submit(ticket, outcome))
	}
}
