//! Domain types and services for the book-review form.
//!
//! Purpose: define the strongly typed form record, the field validation rule
//! table, and the step navigation machinery. Types are serde-serializable in
//! the canonical camelCase wire shape; invariants are documented on each
//! type.
//!
//! Public surface:
//! - `BookRecord` and its per-step sub-records — the assembled review.
//! - `rules` — pure per-field and cross-field validation.
//! - `Step`, `StepNavigator` — the linear five-step state machine with
//!   access gating.
//! - `FormSession` — session-scoped owner of record plus navigation.
//! - `ports` — the submission and location-sync edges.

pub mod navigator;
pub mod ports;
pub mod reading_status;
pub mod record;
pub mod rules;
pub mod session;
pub mod steps;
pub mod visibility;

pub use self::navigator::{StepNavigator, validate_step_access};
pub use self::reading_status::{ParseReadingStatusError, ReadingStatus};
pub use self::record::{
    BasicInfo, BookRecord, Quote, QuotesInfo, RatingInfo, ReviewInfo, VisibilityInfo,
};
pub use self::rules::{Field, FieldError, StepReport, Violation};
pub use self::session::{FormSession, SessionError};
pub use self::steps::Step;
pub use self::visibility::{ParseVisibilityError, Visibility};
