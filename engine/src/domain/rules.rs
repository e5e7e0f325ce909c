//! Field validation rule table.
//!
//! Every rule is a pure function of the field value, its sibling values, and
//! the cross-step context (`readingStatus`, `rating`, `totalPages`).
//! Validation never throws: failures are data — a [`StepReport`] of
//! field-keyed [`FieldError`]s. Evaluation is synchronous and idempotent;
//! per field, the first failing condition is the one reported.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

use super::reading_status::ReadingStatus;
use super::record::{BasicInfo, BookRecord, QuotesInfo, RatingInfo, ReviewInfo, VisibilityInfo};
use super::steps::Step;

/// Minimum review length once the rating makes the review mandatory.
pub const REVIEW_MIN_CHARS: usize = 100;
/// Minimum reviewer-name length when a name is supplied.
pub const REVIEWER_MIN_CHARS: usize = 2;
/// Minimum quote text length.
pub const QUOTE_TEXT_MIN_CHARS: usize = 5;
/// Lower rating bound.
pub const RATING_MIN: f32 = 0.0;
/// Upper rating bound.
pub const RATING_MAX: f32 = 5.0;

/// Identifier of a validated field, named after its wire-form key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `basic.bookTitle`
    BookTitle,
    /// `basic.author`
    Author,
    /// `basic.publisher`
    Publisher,
    /// `basic.totalPages`
    TotalPages,
    /// `basic.readingStatus`
    ReadingStatus,
    /// `basic.startDate`
    StartDate,
    /// `basic.endDate`
    EndDate,
    /// `rating.rating`
    Rating,
    /// `review.reviewer`
    Reviewer,
    /// `review.content`
    Content,
    /// The quote list as a whole.
    Quotes,
    /// `quotes.quotes[i].text`
    QuoteText,
    /// `quotes.quotes[i].page`
    QuotePage,
    /// `visibilityInfo.visibility`
    Visibility,
}

impl Field {
    /// Wire-form key of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BookTitle => "bookTitle",
            Self::Author => "author",
            Self::Publisher => "publisher",
            Self::TotalPages => "totalPages",
            Self::ReadingStatus => "readingStatus",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::Rating => "rating",
            Self::Reviewer => "reviewer",
            Self::Content => "content",
            Self::Quotes => "quotes",
            Self::QuoteText => "text",
            Self::QuotePage => "page",
            Self::Visibility => "visibility",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields whose verdict can change when `changed` changes.
///
/// This is the explicit dependency graph the reactive layer consults to know
/// what to re-validate on a field-change event, instead of recomputing the
/// whole form.
pub fn dependents(changed: Field) -> &'static [Field] {
    match changed {
        Field::ReadingStatus => &[Field::StartDate, Field::EndDate],
        Field::StartDate => &[Field::EndDate],
        Field::Rating => &[Field::Content, Field::Reviewer],
        Field::TotalPages => &[Field::QuotePage],
        _ => &[],
    }
}

/// A single rule failure.
///
/// Variants carry the parameters their messages interpolate, mirroring the
/// wording the form has always shown.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// Title left blank.
    #[error("book title is required")]
    TitleRequired,
    /// Author left blank.
    #[error("author is required")]
    AuthorRequired,
    /// Publisher left blank.
    #[error("publisher is required")]
    PublisherRequired,
    /// A reading-period date entered while the status forbids any.
    #[error("a reading period cannot be entered while the book is marked {}", status.label())]
    DatesForbidden {
        /// Status forbidding the dates.
        status: ReadingStatus,
    },
    /// Start date missing while the status requires one.
    #[error("a start date is required while the book is marked {}", status.label())]
    StartDateRequired {
        /// Status requiring the date.
        status: ReadingStatus,
    },
    /// End date entered while the status forbids one.
    #[error("an end date cannot be entered while the book is marked {}", status.label())]
    EndDateForbidden {
        /// Status forbidding the date.
        status: ReadingStatus,
    },
    /// End date missing for a finished book.
    #[error("an end date is required once the book is read")]
    EndDateRequired,
    /// Reading period inverted or zero-length.
    #[error("end date must be after start date")]
    EndDateNotAfterStart,
    /// Rating still at the unrated sentinel.
    #[error("select a star rating")]
    RatingMissing,
    /// Rating outside the star scale.
    #[error("rating must be between {min} and {max} stars")]
    RatingOutOfRange {
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// Review text missing while the rating makes it mandatory.
    #[error("a written review is required for a {rating}-star rating")]
    ContentRequired {
        /// The extreme rating triggering the requirement.
        rating: f32,
    },
    /// Review text present but too short to support the rating.
    #[error("write at least {min} characters to support your rating")]
    ContentTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Reviewer name missing while required.
    #[error("a reviewer name is required")]
    ReviewerRequired,
    /// Reviewer name supplied but too short.
    #[error("reviewer name must be at least {min} characters")]
    ReviewerTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Quote list emptied.
    #[error("add at least one quote")]
    QuotesEmpty,
    /// Quote text left blank.
    #[error("quote text is required")]
    QuoteTextRequired,
    /// Quote text too short.
    #[error("quote text must be at least {min} characters")]
    QuoteTextTooShort {
        /// Required minimum length.
        min: usize,
    },
    /// Page number missing while the page count is known.
    #[error("a page number is required")]
    QuotePageRequired,
    /// Page number below 1.
    #[error("page number must be at least 1")]
    QuotePageTooSmall,
    /// Page number beyond the book.
    #[error("page number must not exceed the total page count ({total})")]
    QuotePageTooLarge {
        /// The book's total page count.
        total: u32,
    },
}

impl Violation {
    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TitleRequired => "title_required",
            Self::AuthorRequired => "author_required",
            Self::PublisherRequired => "publisher_required",
            Self::DatesForbidden { .. } => "dates_forbidden",
            Self::StartDateRequired { .. } => "start_date_required",
            Self::EndDateForbidden { .. } => "end_date_forbidden",
            Self::EndDateRequired => "end_date_required",
            Self::EndDateNotAfterStart => "end_date_not_after_start",
            Self::RatingMissing => "rating_missing",
            Self::RatingOutOfRange { .. } => "rating_out_of_range",
            Self::ContentRequired { .. } => "content_required",
            Self::ContentTooShort { .. } => "content_too_short",
            Self::ReviewerRequired => "reviewer_required",
            Self::ReviewerTooShort { .. } => "reviewer_too_short",
            Self::QuotesEmpty => "quotes_empty",
            Self::QuoteTextRequired => "quote_text_required",
            Self::QuoteTextTooShort { .. } => "quote_text_too_short",
            Self::QuotePageRequired => "quote_page_required",
            Self::QuotePageTooSmall => "quote_page_too_small",
            Self::QuotePageTooLarge { .. } => "quote_page_too_large",
        }
    }
}

/// A rule failure keyed to the field that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// The failing field.
    pub field: Field,
    /// Index into the quote list when the field belongs to one entry.
    pub quote_index: Option<usize>,
    /// What went wrong.
    pub violation: Violation,
}

impl FieldError {
    /// Human-readable message for the failure.
    pub fn message(&self) -> String {
        self.violation.to_string()
    }

    /// Wire-form path of the failing field, e.g. `quotes[2].page`.
    pub fn path(&self) -> String {
        self.quote_index.map_or_else(
            || self.field.as_str().to_owned(),
            |index| format!("quotes[{index}].{}", self.field.as_str()),
        )
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldError", 4)?;
        state.serialize_field("field", self.field.as_str())?;
        state.serialize_field("path", &self.path())?;
        state.serialize_field("code", self.violation.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Verdict for one step's worth of fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepReport {
    errors: Vec<FieldError>,
}

impl StepReport {
    /// Whether every rule passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the step may advance; alias of [`StepReport::is_valid`]
    /// matching the navigation contract.
    pub fn can_advance(&self) -> bool {
        self.is_valid()
    }

    /// All failures in evaluation order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The failure attached to a top-level field, if any.
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|error| error.field == field && error.quote_index.is_none())
    }

    /// The failure attached to a field of one quote entry, if any.
    pub fn quote_error_for(&self, index: usize, field: Field) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|error| error.field == field && error.quote_index == Some(index))
    }

    fn push(&mut self, field: Field, violation: Violation) {
        self.errors.push(FieldError {
            field,
            quote_index: None,
            violation,
        });
    }

    fn push_quote(&mut self, index: usize, field: Field, violation: Violation) {
        self.errors.push(FieldError {
            field,
            quote_index: Some(index),
            violation,
        });
    }
}

impl Serialize for StepReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StepReport", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

/// Whether the rating makes the written review mandatory.
///
/// Exactly the extreme ratings 1.0 and 5.0 trigger the requirement; 0.5 and
/// 4.5 do not.
pub fn content_required(rating: f32) -> bool {
    rating == 1.0 || rating == 5.0
}

fn blank(text: &str) -> bool {
    text.trim().is_empty()
}

fn check_start_date(basic: &BasicInfo) -> Result<(), Violation> {
    let status = basic.reading_status;
    if !status.allows_dates() && basic.start_date.is_some() {
        return Err(Violation::DatesForbidden { status });
    }
    if status.requires_start_date() && basic.start_date.is_none() {
        return Err(Violation::StartDateRequired { status });
    }
    Ok(())
}

fn check_end_date(basic: &BasicInfo) -> Result<(), Violation> {
    let status = basic.reading_status;
    if basic.end_date.is_some() && !status.allows_end_date() {
        if status.allows_dates() {
            return Err(Violation::EndDateForbidden { status });
        }
        return Err(Violation::DatesForbidden { status });
    }
    if status.requires_end_date() && basic.end_date.is_none() {
        return Err(Violation::EndDateRequired);
    }
    // Ordering is checked only after the status table passes.
    if let (Some(start), Some(end)) = (basic.start_date, basic.end_date) {
        if start >= end {
            return Err(Violation::EndDateNotAfterStart);
        }
    }
    Ok(())
}

/// Validate the basic-info step.
pub fn validate_basic(basic: &BasicInfo) -> StepReport {
    let mut report = StepReport::default();
    if blank(&basic.title) {
        report.push(Field::BookTitle, Violation::TitleRequired);
    }
    if blank(&basic.author) {
        report.push(Field::Author, Violation::AuthorRequired);
    }
    if blank(&basic.publisher) {
        report.push(Field::Publisher, Violation::PublisherRequired);
    }
    if let Err(violation) = check_start_date(basic) {
        report.push(Field::StartDate, violation);
    }
    if let Err(violation) = check_end_date(basic) {
        report.push(Field::EndDate, violation);
    }
    report
}

/// Validate the rating step.
pub fn validate_rating(rating: &RatingInfo) -> StepReport {
    let mut report = StepReport::default();
    if rating.rating < RATING_MIN || rating.rating > RATING_MAX {
        report.push(
            Field::Rating,
            Violation::RatingOutOfRange {
                min: RATING_MIN,
                max: RATING_MAX,
            },
        );
    } else if rating.rating == 0.0 {
        report.push(Field::Rating, Violation::RatingMissing);
    }
    report
}

/// Validate the written-review step against the rating chosen earlier.
pub fn validate_review(review: &ReviewInfo, rating: f32) -> StepReport {
    let mut report = StepReport::default();
    let required = content_required(rating);

    if required && blank(&review.content) {
        report.push(Field::Content, Violation::ContentRequired { rating });
    } else if required && review.content.chars().count() < REVIEW_MIN_CHARS {
        report.push(
            Field::Content,
            Violation::ContentTooShort {
                min: REVIEW_MIN_CHARS,
            },
        );
    }

    // A reviewer name accompanies any written content, mandatory or not.
    let reviewer_required = required || !blank(&review.content);
    if reviewer_required && blank(&review.reviewer) {
        report.push(Field::Reviewer, Violation::ReviewerRequired);
    } else if !blank(&review.reviewer) && review.reviewer.trim().chars().count() < REVIEWER_MIN_CHARS
    {
        report.push(
            Field::Reviewer,
            Violation::ReviewerTooShort {
                min: REVIEWER_MIN_CHARS,
            },
        );
    }
    report
}

fn check_quote_page(page: Option<u32>, total_pages: u32) -> Result<(), Violation> {
    // Unknown page count suppresses page validation entirely.
    if total_pages == 0 {
        return Ok(());
    }
    match page {
        None => Err(Violation::QuotePageRequired),
        Some(0) => Err(Violation::QuotePageTooSmall),
        Some(value) if value > total_pages => Err(Violation::QuotePageTooLarge {
            total: total_pages,
        }),
        Some(_) => Ok(()),
    }
}

/// Validate the quotes step against the page count from the basic step.
pub fn validate_quotes(quotes: &QuotesInfo, total_pages: u32) -> StepReport {
    let mut report = StepReport::default();
    if quotes.quotes.is_empty() {
        report.push(Field::Quotes, Violation::QuotesEmpty);
        return report;
    }
    for (index, quote) in quotes.quotes.iter().enumerate() {
        if blank(&quote.text) {
            report.push_quote(index, Field::QuoteText, Violation::QuoteTextRequired);
        } else if quote.text.trim().chars().count() < QUOTE_TEXT_MIN_CHARS {
            report.push_quote(
                index,
                Field::QuoteText,
                Violation::QuoteTextTooShort {
                    min: QUOTE_TEXT_MIN_CHARS,
                },
            );
        }
        if let Err(violation) = check_quote_page(quote.page, total_pages) {
            report.push_quote(index, Field::QuotePage, violation);
        }
    }
    report
}

/// Validate the visibility step.
///
/// The choice is an enum that cannot be unset, so this always passes; the
/// function exists so every step validates through the same surface.
pub fn validate_visibility(_visibility: &VisibilityInfo) -> StepReport {
    StepReport::default()
}

/// Validate one step of the merged record, supplying cross-step context.
pub fn validate_step(record: &BookRecord, step: Step) -> StepReport {
    match step {
        Step::Basic => validate_basic(&record.basic),
        Step::Rating => validate_rating(&record.rating),
        Step::Review => validate_review(&record.review, record.rating.rating),
        Step::Quotes => validate_quotes(&record.quotes, record.basic.total_pages),
        Step::Visibility => validate_visibility(&record.visibility_info),
    }
}

#[cfg(test)]
mod tests;
