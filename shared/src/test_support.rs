// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stand-ins for the browser pieces used in unit tests.

use crate::draft::{RegistrantDraft, SelectedFile};
use crate::preview::PreviewBackend;
use crate::schema::FieldKey;
use crate::submission::{RegistrationTransport, SubmissionOutcome, SubmissionPayload};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct FakeFile {
	name: String,
	mime: String,
	size: u64,
}

impl FakeFile {
	pub fn new(name: &str, mime: &str, size: u64) -> Self {
		Self {
			name: name.to_string(),
			mime: mime.to_string(),
			size,
		}
	}
}

impl SelectedFile for FakeFile {
	fn file_name(&self) -> String {
		self.name.clone()
	}

	fn mime_type(&self) -> String {
		self.mime.clone()
	}

	fn size(&self) -> u64 {
		self.size
	}
}

pub fn image_file(name: &str) -> FakeFile {
	FakeFile::new(name, "image/png", 2048)
}

pub fn pdf_file(name: &str) -> FakeFile {
	FakeFile::new(name, "application/pdf", 4096)
}

pub fn filled_basic_info() -> RegistrantDraft<FakeFile> {
	let mut draft = RegistrantDraft::new();
	draft.set_value(FieldKey::FullName, "Ayesha Khan");
	draft.set_value(FieldKey::University, "NUST");
	draft.set_value(FieldKey::Email, "ayesha@students.nust.edu.pk");
	draft.set_value(FieldKey::Cnic, "35202-1234567-1");
	draft.set_value(FieldKey::Phone, "0300-1234567");
	draft
}

/// Records every handle handed out and revoked by [`CountingPreviews`].
#[derive(Debug, Default)]
pub struct PreviewLedger {
	pub created: u32,
	pub live: BTreeSet<u32>,
	pub revoked: Vec<u32>,
}

#[derive(Clone, Default)]
pub struct CountingPreviews {
	pub ledger: Rc<RefCell<PreviewLedger>>,
}

impl PreviewBackend<FakeFile> for CountingPreviews {
	type Handle = u32;

	fn create(&mut self, _file: &FakeFile) -> Option<u32> {
		let mut ledger = self.ledger.borrow_mut();
		ledger.created += 1;
		let handle = ledger.created;
		ledger.live.insert(handle);
		Some(handle)
	}

	fn revoke(&mut self, handle: u32) {
		let mut ledger = self.ledger.borrow_mut();
		assert!(ledger.live.remove(&handle), "handle {handle} revoked twice");
		ledger.revoked.push(handle);
	}
}

/// A transport that answers every request with a fixed outcome and remembers what it was sent.
pub struct ScriptedTransport {
	outcome: SubmissionOutcome,
	pub sent: RefCell<Vec<Vec<&'static str>>>,
}

impl ScriptedTransport {
	pub fn new(outcome: SubmissionOutcome) -> Self {
		Self {
			outcome,
			sent: RefCell::new(Vec::new()),
		}
	}

	pub fn call_count(&self) -> usize {
		self.sent.borrow().len()
	}
}

impl RegistrationTransport<FakeFile> for ScriptedTransport {
	async fn send(&self, payload: &SubmissionPayload<FakeFile>) -> SubmissionOutcome {
		self.sent.borrow_mut().push(payload.keys().collect());
		self.outcome.clone()
	}
}
