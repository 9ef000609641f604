// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::draft::{RegistrantDraft, SelectedFile};
use crate::schema::FormSchema;
use crate::validation::{validate_step, FieldErrorSet, UploadLimits};

/// Linear position in a wizard of a fixed number of steps. Positions are 1-based.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StepNavigator {
	current: usize,
	step_count: usize,
}

impl StepNavigator {
	pub fn new(step_count: usize) -> Self {
		Self {
			current: 1,
			step_count: step_count.max(1),
		}
	}

	pub fn current(&self) -> usize {
		self.current
	}

	pub fn step_count(&self) -> usize {
		self.step_count
	}

	pub fn is_first(&self) -> bool {
		self.current == 1
	}

	pub fn is_last(&self) -> bool {
		self.current == self.step_count
	}

	pub fn reset(&mut self) {
		self.current = 1;
	}

	/// Validates the current step and moves forward if it passes.
	///
	/// # Errors
	///
	/// Returns the errors for the current step's inputs when any of them fail. The position
	/// doesn't change in that case.
	pub fn advance<F: SelectedFile>(
		&mut self,
		schema: &FormSchema,
		draft: &RegistrantDraft<F>,
		limits: UploadLimits,
	) -> Result<usize, FieldErrorSet> {
		if let Some(step) = schema.step(self.current) {
			let errors = validate_step(step, draft, limits);
			if !errors.is_empty() {
				return Err(errors);
			}
		}
		self.current = (self.current + 1).min(self.step_count);
		Ok(self.current)
	}

	pub fn retreat(&mut self) -> usize {
		self.current = self.current.saturating_sub(1).max(1);
		self.current
	}

	pub fn jump_to(&mut self, step: usize) -> usize {
		self.current = step.clamp(1, self.step_count);
		self.current
	}

	/// Fraction of the wizard reached, for the progress indicator
	pub fn progress(&self) -> f64 {
		self.current as f64 / self.step_count as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::FieldKey;
	use crate::test_support::{filled_basic_info, FakeFile};

	#[test]
	fn advance_is_gated_by_the_current_step() {
		let schema = FormSchema::registration();
		let mut navigator = StepNavigator::new(schema.step_count());
		let mut draft: RegistrantDraft<FakeFile> = RegistrantDraft::new();
		draft.set_value(FieldKey::FullName, "Ayesha Khan");

		let errors = navigator
			.advance(&schema, &draft, UploadLimits::default())
			.expect_err("step 1 is incomplete");
		assert_eq!(errors.len(), 4);
		assert_eq!(navigator.current(), 1);

		let draft = filled_basic_info();
		assert_eq!(navigator.advance(&schema, &draft, UploadLimits::default()), Ok(2));
		assert!(navigator.is_last());
	}

	#[test]
	fn advance_clamps_at_the_last_step() {
		let schema = FormSchema::application();
		let mut navigator = StepNavigator::new(schema.step_count());
		navigator.jump_to(3);
		let draft: RegistrantDraft<FakeFile> = RegistrantDraft::new();
		// The last step still validates; an incomplete draft doesn't move.
		assert!(navigator.advance(&schema, &draft, UploadLimits::default()).is_err());
		assert_eq!(navigator.current(), 3);
	}

	#[test]
	fn retreat_clamps_at_the_first_step() {
		let mut navigator = StepNavigator::new(3);
		navigator.jump_to(3);
		assert_eq!(navigator.retreat(), 2);
		assert_eq!(navigator.retreat(), 1);
		assert_eq!(navigator.retreat(), 1);
		assert!(navigator.is_first());
	}

	#[test]
	fn jump_is_clamped() {
		let mut navigator = StepNavigator::new(2);
		assert_eq!(navigator.jump_to(0), 1);
		assert_eq!(navigator.jump_to(9), 2);
		navigator.reset();
		assert_eq!(navigator.current(), 1);
		assert_eq!(navigator.progress(), 0.5);
	}
}
