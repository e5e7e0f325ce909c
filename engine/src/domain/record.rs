//! The assembled book-review record and its per-step sub-records.
//!
//! Each sub-record is owned exclusively by one form step and merged into the
//! whole only once that step validates. The wire shape is the canonical
//! camelCase JSON the form has always produced.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::reading_status::ReadingStatus;
use super::visibility::Visibility;

/// Step 1: book metadata, reading status, and reading period.
///
/// ## Invariants
/// - `total_pages == 0` is the "unknown" sentinel; it suppresses quote page
///   validation downstream.
/// - Which dates may be present is keyed on `reading_status`; the rule table
///   enforces the combinations, this type only carries the values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BasicInfo {
    /// Book title.
    #[serde(rename = "bookTitle")]
    pub title: String,
    /// Author name.
    pub author: String,
    /// Publisher name.
    pub publisher: String,
    /// Total page count; `0` means unknown.
    #[serde(default)]
    pub total_pages: u32,
    /// Progress through the book.
    pub reading_status: ReadingStatus,
    /// Date reading started (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Date reading finished (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl BasicInfo {
    /// Whether the page count is the "unknown" sentinel.
    pub fn total_pages_unknown(&self) -> bool {
        self.total_pages == 0
    }
}

/// Step 2: recommendation flag and star rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct RatingInfo {
    /// Whether the reviewer recommends the book.
    pub is_recommended: bool,
    /// Star rating on a 0–5 scale in half-point increments; `0.0` means not
    /// yet rated.
    pub rating: f32,
}

/// Step 3: the written review.
///
/// The timestamps are stamped by the session on merge, not by the input
/// layer: `created_at` on the first successful review submission,
/// `updated_at` on every one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ReviewInfo {
    /// Name of the person writing the review.
    pub reviewer: String,
    /// The review text.
    pub content: String,
    /// First time this review was merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last time this review was merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A single memorable passage from the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Quote {
    /// The quoted text.
    pub text: String,
    /// Page the quote appears on; absent while the page count is unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Step 4: the collected quotes.
///
/// ## Invariants
/// - The list never empties: it starts with one blank entry and
///   [`QuotesInfo::remove`] refuses to delete the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct QuotesInfo {
    /// Ordered quote entries.
    pub quotes: Vec<Quote>,
}

impl QuotesInfo {
    /// Append a blank entry for the user to fill in.
    pub fn add_blank(&mut self) {
        self.quotes.push(Quote::default());
    }

    /// Remove the entry at `index`.
    ///
    /// Returns `false` without mutating when the index is out of range or
    /// when removal would empty the list.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.quotes.len() <= 1 || index >= self.quotes.len() {
            return false;
        }
        self.quotes.remove(index);
        true
    }
}

impl Default for QuotesInfo {
    fn default() -> Self {
        Self {
            quotes: vec![Quote::default()],
        }
    }
}

/// Step 5: visibility choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct VisibilityInfo {
    /// Who may see the finished review.
    pub visibility: Visibility,
}

/// The whole review record assembled across the five steps.
///
/// Created with defaults at session start, mutated only through the `merge_*`
/// operations as steps validate, and reset after final submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BookRecord {
    /// Step 1 data.
    pub basic: BasicInfo,
    /// Step 2 data.
    pub rating: RatingInfo,
    /// Step 3 data.
    pub review: ReviewInfo,
    /// Step 4 data.
    pub quotes: QuotesInfo,
    /// Step 5 data.
    #[serde(rename = "visibilityInfo")]
    pub visibility_info: VisibilityInfo,
}

impl BookRecord {
    /// Replace the basic-info sub-record with validated step data.
    pub fn merge_basic(&mut self, data: BasicInfo) {
        self.basic = data;
    }

    /// Replace the rating sub-record with validated step data.
    pub fn merge_rating(&mut self, data: RatingInfo) {
        self.rating = data;
    }

    /// Replace the review sub-record with validated step data, stamping
    /// `created_at` on the first merge and `updated_at` on every merge.
    pub fn merge_review(&mut self, data: ReviewInfo, now: DateTime<Utc>) {
        let created_at = self.review.created_at.or(Some(now));
        self.review = ReviewInfo {
            created_at,
            updated_at: Some(now),
            ..data
        };
    }

    /// Replace the quotes sub-record with validated step data.
    pub fn merge_quotes(&mut self, data: QuotesInfo) {
        self.quotes = data;
    }

    /// Replace the visibility sub-record with validated step data.
    pub fn merge_visibility(&mut self, data: VisibilityInfo) {
        self.visibility_info = data;
    }
}
