//! Edges of the engine.
//!
//! Ports describe how the engine expects to interact with its collaborators:
//! the final submission sink and the shareable location representation (e.g.
//! a URL step parameter). Each trait exposes strongly typed errors so
//! adapters map their failures into predictable variants.
//!
//! The whole engine is single-threaded and event-driven, so the ports are
//! synchronous; reading and writing the location is a side effect confined
//! to the navigation boundary, never interleaved with rule evaluation.

use std::cell::RefCell;

use thiserror::Error;
use tracing::info;

use super::record::BookRecord;
use super::steps::Step;

/// Errors surfaced by a submission adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The sink could not take delivery of the record.
    #[error("review submission failed: {message}")]
    Delivery {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl SubmitError {
    /// Helper for delivery failures.
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Destination of the finished record.
///
/// The engine calls this exactly once per session, with the fully merged
/// snapshot, after the final step validates.
#[cfg_attr(test, mockall::automock)]
pub trait ReviewSink {
    /// Take delivery of a completed review record.
    fn submit(&self, record: &BookRecord) -> Result<(), SubmitError>;
}

/// Sink that logs the record, mirroring the reference behaviour where
/// submission had only a log side effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingReviewSink;

impl ReviewSink for LoggingReviewSink {
    fn submit(&self, record: &BookRecord) -> Result<(), SubmitError> {
        info!(
            title = %record.basic.title,
            rating = record.rating.rating,
            quotes = record.quotes.quotes.len(),
            visibility = %record.visibility_info.visibility,
            "book review submitted"
        );
        Ok(())
    }
}

/// Shareable location holding the current step across reloads.
///
/// `read` returns the raw persisted representation; parsing and
/// normalization stay with the engine because reload input genuinely
/// arrives as text.
pub trait StepLocation {
    /// Raw persisted step representation, if any.
    fn read(&self) -> Option<String>;

    /// Persist the active step.
    fn write(&self, step: Step);
}

/// Location adapter holding the step in memory for the session's lifetime.
#[derive(Debug, Default)]
pub struct InMemoryStepLocation {
    slot: RefCell<Option<String>>,
}

impl InMemoryStepLocation {
    /// Create an adapter seeded with a raw step representation, as a reload
    /// with a step parameter would be.
    pub fn seeded(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }
}

impl StepLocation for InMemoryStepLocation {
    fn read(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn write(&self, step: Step) {
        *self.slot.borrow_mut() = Some(step.number().to_string());
    }
}
