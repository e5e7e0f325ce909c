//! Session-scoped owner of the form state.
//!
//! A [`FormSession`] owns the in-memory [`BookRecord`] and the step
//! navigator for the lifetime of one browser session. All mutation happens
//! on user-initiated edit or navigation events, processed one at a time to
//! completion; every validation and transition is synchronous.

use chrono::Utc;
use stepper::LinearStep;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::navigator::{StepNavigator, validate_step_access};
use super::ports::{InMemoryStepLocation, ReviewSink, StepLocation, SubmitError};
use super::record::{BasicInfo, BookRecord, QuotesInfo, RatingInfo, ReviewInfo, VisibilityInfo};
use super::rules::{self, StepReport};
use super::steps::Step;

/// Errors surfaced by the final submission.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The final step's data failed validation.
    #[error("step data failed validation")]
    Validation(StepReport),
    /// The sink refused the record.
    #[error(transparent)]
    Submission(#[from] SubmitError),
}

/// One user's in-progress review submission.
///
/// The record starts at defaults, grows by merging each step's validated
/// sub-record, and is reset after the final submission succeeds. Step
/// changes are mirrored into the [`StepLocation`] so the active step
/// survives a reload.
#[derive(Debug)]
pub struct FormSession<L: StepLocation = InMemoryStepLocation> {
    id: Uuid,
    record: BookRecord,
    navigator: StepNavigator,
    location: L,
}

impl FormSession<InMemoryStepLocation> {
    /// Start a fresh session with an in-memory location.
    pub fn new() -> Self {
        Self::with_location(InMemoryStepLocation::default())
    }
}

impl Default for FormSession<InMemoryStepLocation> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: StepLocation> FormSession<L> {
    /// Start a session resuming from whatever step the location persisted.
    ///
    /// Malformed location input normalizes to step 1, and the gating chain
    /// then pushes the session back to the first step whose preconditions
    /// the (fresh) record does not meet.
    pub fn with_location(location: L) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            record: BookRecord::default(),
            navigator: StepNavigator::resume(location.read().as_deref()),
            location,
        };
        let landed = session.gate_to(session.navigator.current());
        debug!(session = %session.id, step = %landed, "session started");
        session
    }

    /// Stable session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Snapshot of the merged record.
    pub fn record(&self) -> &BookRecord {
        &self.record
    }

    /// The active step.
    pub fn current_step(&self) -> Step {
        self.navigator.current()
    }

    /// Whether the first step is active.
    pub fn is_first_step(&self) -> bool {
        self.navigator.is_first()
    }

    /// Whether the last step is active.
    pub fn is_last_step(&self) -> bool {
        self.navigator.is_last()
    }

    /// Go back one step. Returns the step now active.
    pub fn go_previous(&mut self) -> Step {
        let _ = self.navigator.go_previous();
        let current = self.navigator.current();
        self.location.write(current);
        current
    }

    /// Request a step by its raw representation (e.g. a URL parameter).
    ///
    /// The input is normalized (anything malformed becomes step 1), the
    /// gating chain may push the request back to the first step with unmet
    /// preconditions, and the granted step is persisted and returned.
    pub fn request_step(&mut self, raw: Option<&str>) -> Step {
        let requested = StepNavigator::normalize(raw);
        self.gate_to(requested)
    }

    fn gate_to(&mut self, requested: Step) -> Step {
        let granted = match validate_step_access(&self.record, requested) {
            Some(redirect) => {
                warn!(
                    session = %self.id,
                    requested = %requested,
                    redirect = %redirect,
                    "step access denied; redirecting"
                );
                redirect
            }
            None => requested,
        };
        self.navigator.go_to(granted);
        self.location.write(granted);
        granted
    }

    fn advance_from(&mut self, submitted: Step) -> Step {
        let next = submitted.next().unwrap_or(submitted);
        self.navigator.go_to(next);
        self.location.write(next);
        next
    }

    /// Validate a basic-info draft without merging, for live feedback.
    pub fn check_basic(&self, draft: &BasicInfo) -> StepReport {
        rules::validate_basic(draft)
    }

    /// Validate a rating draft without merging.
    pub fn check_rating(&self, draft: &RatingInfo) -> StepReport {
        rules::validate_rating(draft)
    }

    /// Validate a review draft against the merged rating without merging.
    pub fn check_review(&self, draft: &ReviewInfo) -> StepReport {
        rules::validate_review(draft, self.record.rating.rating)
    }

    /// Validate a quotes draft against the merged page count without
    /// merging.
    pub fn check_quotes(&self, draft: &QuotesInfo) -> StepReport {
        rules::validate_quotes(draft, self.record.basic.total_pages)
    }

    /// Submit the basic-info step: validate, merge, advance.
    ///
    /// # Errors
    /// Returns the [`StepReport`] and holds the step when any rule fails.
    pub fn submit_basic(&mut self, data: BasicInfo) -> Result<Step, StepReport> {
        let report = rules::validate_basic(&data);
        if !report.is_valid() {
            debug!(session = %self.id, errors = report.errors().len(), "basic info rejected");
            return Err(report);
        }
        self.record.merge_basic(data);
        Ok(self.advance_from(Step::Basic))
    }

    /// Submit the rating step: validate, merge, advance.
    ///
    /// # Errors
    /// Returns the [`StepReport`] and holds the step when any rule fails.
    pub fn submit_rating(&mut self, data: RatingInfo) -> Result<Step, StepReport> {
        let report = rules::validate_rating(&data);
        if !report.is_valid() {
            debug!(session = %self.id, errors = report.errors().len(), "rating rejected");
            return Err(report);
        }
        self.record.merge_rating(data);
        Ok(self.advance_from(Step::Rating))
    }

    /// Submit the review step: validate against the merged rating, merge
    /// with fresh timestamps, advance.
    ///
    /// # Errors
    /// Returns the [`StepReport`] and holds the step when any rule fails.
    pub fn submit_review(&mut self, data: ReviewInfo) -> Result<Step, StepReport> {
        let report = rules::validate_review(&data, self.record.rating.rating);
        if !report.is_valid() {
            debug!(session = %self.id, errors = report.errors().len(), "review rejected");
            return Err(report);
        }
        self.record.merge_review(data, Utc::now());
        Ok(self.advance_from(Step::Review))
    }

    /// Submit the quotes step: validate against the merged page count,
    /// merge, advance.
    ///
    /// # Errors
    /// Returns the [`StepReport`] and holds the step when any rule fails.
    pub fn submit_quotes(&mut self, data: QuotesInfo) -> Result<Step, StepReport> {
        let report = rules::validate_quotes(&data, self.record.basic.total_pages);
        if !report.is_valid() {
            debug!(session = %self.id, errors = report.errors().len(), "quotes rejected");
            return Err(report);
        }
        self.record.merge_quotes(data);
        Ok(self.advance_from(Step::Quotes))
    }

    /// Submit the final step: validate, merge, deliver the snapshot through
    /// the sink, then reset the session.
    ///
    /// Returns the snapshot that was delivered.
    ///
    /// # Errors
    /// Returns [`SessionError::Validation`] when the step data fails
    /// validation and [`SessionError::Submission`] when the sink refuses
    /// delivery; the record is kept in both cases.
    pub fn submit_visibility<S: ReviewSink + ?Sized>(
        &mut self,
        data: VisibilityInfo,
        sink: &S,
    ) -> Result<BookRecord, SessionError> {
        let report = rules::validate_visibility(&data);
        if !report.is_valid() {
            return Err(SessionError::Validation(report));
        }
        self.record.merge_visibility(data);

        let snapshot = self.record.clone();
        sink.submit(&snapshot)?;
        info!(session = %self.id, title = %snapshot.basic.title, "review submitted; session reset");
        self.reset();
        Ok(snapshot)
    }

    /// Discard the record and return to the first step.
    pub fn reset(&mut self) {
        self.record = BookRecord::default();
        self.navigator.go_to(Step::Basic);
        self.location.write(Step::Basic);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
