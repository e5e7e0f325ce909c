//! Step navigation with validation-gated access.
//!
//! The navigator is a thin wrapper over the linear [`Stepper`]; the only
//! non-linear element is [`validate_step_access`], which pushes a request
//! back to the step immediately preceding the first unmet precondition.

use stepper::{LinearStep, Stepper, normalize_step};
use tracing::debug;

use super::record::BookRecord;
use super::rules;
use super::steps::Step;

/// Tracks which of the five steps is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepNavigator {
    stepper: Stepper<Step>,
}

impl StepNavigator {
    /// Start at the first step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a persisted raw step representation, normalizing
    /// malformed input to the first step.
    pub fn resume(raw: Option<&str>) -> Self {
        Self {
            stepper: Stepper::resume(raw),
        }
    }

    /// The active step.
    pub fn current(&self) -> Step {
        self.stepper.current()
    }

    /// Whether the first step is active.
    pub fn is_first(&self) -> bool {
        self.stepper.is_first()
    }

    /// Whether the last step is active.
    pub fn is_last(&self) -> bool {
        self.stepper.is_last()
    }

    /// Number of steps in the flow.
    pub fn total_steps(&self) -> u8 {
        Step::total()
    }

    /// Advance one step; no-op on the last step.
    pub fn go_next(&mut self) -> bool {
        let moved = self.stepper.advance();
        if moved {
            debug!(step = %self.current(), "advanced to next step");
        }
        moved
    }

    /// Go back one step; no-op on the first step.
    pub fn go_previous(&mut self) -> bool {
        let moved = self.stepper.retreat();
        if moved {
            debug!(step = %self.current(), "returned to previous step");
        }
        moved
    }

    /// Jump directly to `step`.
    pub fn go_to(&mut self, step: Step) {
        self.stepper.jump(step);
        debug!(step = %step, "jumped to step");
    }

    /// Normalize raw step input (e.g. a URL parameter) to a typed step.
    pub fn normalize(raw: Option<&str>) -> Step {
        normalize_step(raw)
    }
}

/// Decide whether `requested` is reachable given the accumulated record.
///
/// Returns the redirect target when a precondition of an earlier step is
/// unmet — always the step immediately preceding the first failing
/// precondition — or `None` when access is granted. The chain, first unmet
/// wins:
///
/// 1. step ≥ 2 needs title, author, and publisher;
/// 2. step ≥ 3 needs a rating;
/// 3. step ≥ 4 needs review content when the rating demands one;
/// 4. step ≥ 5 needs a first quote.
pub fn validate_step_access(record: &BookRecord, requested: Step) -> Option<Step> {
    let wanted = requested.ordinal();

    if wanted >= Step::Rating.ordinal() && !basic_complete(record) {
        return Some(Step::Basic);
    }
    if wanted >= Step::Review.ordinal() && record.rating.rating == 0.0 {
        return Some(Step::Rating);
    }
    if wanted >= Step::Quotes.ordinal() && mandatory_review_missing(record) {
        return Some(Step::Review);
    }
    if wanted >= Step::Visibility.ordinal() && first_quote_blank(record) {
        return Some(Step::Quotes);
    }
    None
}

fn basic_complete(record: &BookRecord) -> bool {
    let basic = &record.basic;
    ![&basic.title, &basic.author, &basic.publisher]
        .iter()
        .any(|value| value.trim().is_empty())
}

fn mandatory_review_missing(record: &BookRecord) -> bool {
    rules::content_required(record.rating.rating) && record.review.content.trim().is_empty()
}

fn first_quote_blank(record: &BookRecord) -> bool {
    record
        .quotes
        .quotes
        .first()
        .is_none_or(|quote| quote.text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{BasicInfo, Quote};
    use rstest::rstest;

    fn filled_record() -> BookRecord {
        let mut record = BookRecord::default();
        record.basic = BasicInfo {
            title: "The Left Hand of Darkness".to_owned(),
            author: "Ursula K. Le Guin".to_owned(),
            publisher: "Ace".to_owned(),
            total_pages: 304,
            ..BasicInfo::default()
        };
        record.rating.rating = 4.0;
        record.quotes.quotes = vec![Quote {
            text: "Light is the left hand of darkness.".to_owned(),
            page: Some(16),
        }];
        record
    }

    #[rstest]
    fn navigation_is_bounded() {
        let mut navigator = StepNavigator::new();
        assert!(navigator.is_first());
        assert!(!navigator.go_previous());
        assert!(navigator.go_next());
        assert_eq!(navigator.current(), Step::Rating);
        navigator.go_to(Step::Visibility);
        assert!(navigator.is_last());
        assert!(!navigator.go_next());
        assert_eq!(navigator.total_steps(), 5);
    }

    #[rstest]
    #[case(Some("3"), Step::Review)]
    #[case(Some("abc"), Step::Basic)]
    #[case(Some("0"), Step::Basic)]
    #[case(Some("6"), Step::Basic)]
    #[case(None, Step::Basic)]
    fn raw_input_normalizes_to_step_one(#[case] raw: Option<&str>, #[case] expected: Step) {
        assert_eq!(StepNavigator::normalize(raw), expected);
        assert_eq!(StepNavigator::resume(raw).current(), expected);
    }

    #[rstest]
    fn empty_record_redirects_to_basic_first() {
        let record = BookRecord::default();
        // First unmet precondition wins: basic, not rating.
        assert_eq!(validate_step_access(&record, Step::Review), Some(Step::Basic));
        assert_eq!(
            validate_step_access(&record, Step::Visibility),
            Some(Step::Basic)
        );
        assert_eq!(validate_step_access(&record, Step::Basic), None);
    }

    #[rstest]
    fn missing_rating_redirects_to_rating() {
        let mut record = filled_record();
        record.rating.rating = 0.0;
        assert_eq!(
            validate_step_access(&record, Step::Review),
            Some(Step::Rating)
        );
    }

    #[rstest]
    fn extreme_rating_without_content_redirects_to_review() {
        let mut record = filled_record();
        record.rating.rating = 5.0;
        record.review.content = String::new();
        assert_eq!(
            validate_step_access(&record, Step::Quotes),
            Some(Step::Review)
        );

        record.review.content = "Magnificent.".to_owned();
        assert_eq!(validate_step_access(&record, Step::Quotes), None);
    }

    #[rstest]
    fn moderate_rating_does_not_demand_content() {
        let mut record = filled_record();
        record.rating.rating = 3.0;
        record.review.content = String::new();
        assert_eq!(validate_step_access(&record, Step::Quotes), None);
    }

    #[rstest]
    fn blank_first_quote_redirects_to_quotes() {
        let mut record = filled_record();
        record.quotes.quotes = vec![Quote::default()];
        assert_eq!(
            validate_step_access(&record, Step::Visibility),
            Some(Step::Quotes)
        );
        assert_eq!(validate_step_access(&record, Step::Quotes), None);
    }
}
