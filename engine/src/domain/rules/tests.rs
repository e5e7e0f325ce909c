use chrono::NaiveDate;
use rstest::rstest;

use super::*;
use crate::domain::record::Quote;

fn date(y: i32, m: u32, d: u32) -> Option<chrono::NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

fn complete_basic() -> BasicInfo {
    BasicInfo {
        title: "Pachinko".to_owned(),
        author: "Min Jin Lee".to_owned(),
        publisher: "Grand Central".to_owned(),
        total_pages: 496,
        reading_status: ReadingStatus::Read,
        start_date: date(2026, 1, 5),
        end_date: date(2026, 2, 14),
    }
}

#[rstest]
fn complete_basic_info_passes() {
    let report = validate_basic(&complete_basic());
    assert!(report.is_valid());
    assert!(report.can_advance());
    assert!(report.errors().is_empty());
}

#[rstest]
#[case::blank("", Violation::TitleRequired)]
#[case::whitespace("   ", Violation::TitleRequired)]
fn blank_title_is_rejected(#[case] title: &str, #[case] expected: Violation) {
    let basic = BasicInfo {
        title: title.to_owned(),
        ..complete_basic()
    };
    let report = validate_basic(&basic);
    let error = report.error_for(Field::BookTitle);
    assert_eq!(error.map(|e| e.violation.clone()), Some(expected));
}

#[rstest]
fn every_required_text_field_is_reported_independently() {
    let report = validate_basic(&BasicInfo::default());
    assert!(report.error_for(Field::BookTitle).is_some());
    assert!(report.error_for(Field::Author).is_some());
    assert!(report.error_for(Field::Publisher).is_some());
    // WantToRead with no dates: the date table is satisfied.
    assert!(report.error_for(Field::StartDate).is_none());
    assert!(report.error_for(Field::EndDate).is_none());
}

#[rstest]
#[case::want_forbids_start(ReadingStatus::WantToRead, date(2026, 1, 1), None,
    Some("dates_forbidden"), None)]
#[case::want_forbids_end(ReadingStatus::WantToRead, None, date(2026, 2, 1),
    None, Some("dates_forbidden"))]
#[case::want_clean(ReadingStatus::WantToRead, None, None, None, None)]
#[case::reading_needs_start(ReadingStatus::Reading, None, None,
    Some("start_date_required"), None)]
#[case::reading_forbids_end(ReadingStatus::Reading, date(2026, 1, 1), date(2026, 2, 1),
    None, Some("end_date_forbidden"))]
#[case::reading_clean(ReadingStatus::Reading, date(2026, 1, 1), None, None, None)]
#[case::on_hold_needs_start(ReadingStatus::OnHold, None, None,
    Some("start_date_required"), None)]
#[case::on_hold_forbids_end(ReadingStatus::OnHold, date(2026, 1, 1), date(2026, 2, 1),
    None, Some("end_date_forbidden"))]
#[case::read_needs_both(ReadingStatus::Read, None, None,
    Some("start_date_required"), Some("end_date_required"))]
#[case::read_needs_end(ReadingStatus::Read, date(2026, 1, 1), None,
    None, Some("end_date_required"))]
#[case::read_clean(ReadingStatus::Read, date(2026, 1, 1), date(2026, 2, 1), None, None)]
fn reading_period_follows_the_status_table(
    #[case] status: ReadingStatus,
    #[case] start: Option<chrono::NaiveDate>,
    #[case] end: Option<chrono::NaiveDate>,
    #[case] start_code: Option<&str>,
    #[case] end_code: Option<&str>,
) {
    let basic = BasicInfo {
        reading_status: status,
        start_date: start,
        end_date: end,
        ..complete_basic()
    };
    let report = validate_basic(&basic);
    assert_eq!(
        report.error_for(Field::StartDate).map(|e| e.violation.code()),
        start_code
    );
    assert_eq!(
        report.error_for(Field::EndDate).map(|e| e.violation.code()),
        end_code
    );
}

#[rstest]
#[case::inverted(date(2026, 3, 1), date(2026, 2, 1))]
#[case::same_day(date(2026, 3, 1), date(2026, 3, 1))]
fn reading_period_must_be_strictly_increasing(
    #[case] start: Option<chrono::NaiveDate>,
    #[case] end: Option<chrono::NaiveDate>,
) {
    let basic = BasicInfo {
        start_date: start,
        end_date: end,
        ..complete_basic()
    };
    let report = validate_basic(&basic);
    let error = report.error_for(Field::EndDate);
    assert_eq!(
        error.map(|e| e.violation.clone()),
        Some(Violation::EndDateNotAfterStart)
    );
    assert_eq!(
        error.map(FieldError::message),
        Some("end date must be after start date".to_owned())
    );
}

#[rstest]
fn ordering_reports_only_after_the_status_table_passes() {
    // Reading forbids an end date; the inversion is not reported on top.
    let basic = BasicInfo {
        reading_status: ReadingStatus::Reading,
        start_date: date(2026, 3, 1),
        end_date: date(2026, 2, 1),
        ..complete_basic()
    };
    let report = validate_basic(&basic);
    assert_eq!(
        report.error_for(Field::EndDate).map(|e| e.violation.code()),
        Some("end_date_forbidden")
    );
}

#[rstest]
#[case::unrated(0.0, Some("rating_missing"))]
#[case::below(-0.5, Some("rating_out_of_range"))]
#[case::above(5.5, Some("rating_out_of_range"))]
#[case::half_star(0.5, None)]
#[case::top(5.0, None)]
fn rating_stays_on_the_star_scale(#[case] rating: f32, #[case] code: Option<&str>) {
    let info = RatingInfo {
        is_recommended: false,
        rating,
    };
    let report = validate_rating(&info);
    assert_eq!(
        report.error_for(Field::Rating).map(|e| e.violation.code()),
        code
    );
}

#[rstest]
#[case::lowest(1.0, true)]
#[case::highest(5.0, true)]
#[case::near_lowest(1.5, false)]
#[case::near_highest(4.5, false)]
#[case::middle(3.0, false)]
#[case::unrated(0.0, false)]
fn only_the_extreme_ratings_demand_content(#[case] rating: f32, #[case] expected: bool) {
    assert_eq!(content_required(rating), expected);
}

#[rstest]
fn extreme_rating_requires_content() {
    let review = ReviewInfo::default();
    let report = validate_review(&review, 5.0);
    assert_eq!(
        report.error_for(Field::Content).map(|e| e.violation.clone()),
        Some(Violation::ContentRequired { rating: 5.0 })
    );
    // Mandatory content also makes the reviewer name mandatory.
    assert_eq!(
        report.error_for(Field::Reviewer).map(|e| e.violation.clone()),
        Some(Violation::ReviewerRequired)
    );
}

#[rstest]
fn mandatory_content_must_reach_the_minimum_length() {
    let review = ReviewInfo {
        reviewer: "June".to_owned(),
        content: "Too short to justify five stars.".to_owned(),
        ..ReviewInfo::default()
    };
    let report = validate_review(&review, 5.0);
    assert_eq!(
        report.error_for(Field::Content).map(|e| e.violation.clone()),
        Some(Violation::ContentTooShort {
            min: REVIEW_MIN_CHARS
        })
    );
}

#[rstest]
fn long_content_supports_an_extreme_rating() {
    let review = ReviewInfo {
        reviewer: "June".to_owned(),
        content: "g".repeat(REVIEW_MIN_CHARS),
        ..ReviewInfo::default()
    };
    assert!(validate_review(&review, 1.0).is_valid());
}

#[rstest]
fn moderate_rating_allows_an_empty_review() {
    let report = validate_review(&ReviewInfo::default(), 3.0);
    assert!(report.is_valid());
}

#[rstest]
fn voluntary_content_still_needs_a_reviewer() {
    let review = ReviewInfo {
        content: "Enjoyed it more than expected.".to_owned(),
        ..ReviewInfo::default()
    };
    let report = validate_review(&review, 3.0);
    assert_eq!(
        report.error_for(Field::Reviewer).map(|e| e.violation.clone()),
        Some(Violation::ReviewerRequired)
    );
}

#[rstest]
fn one_character_reviewer_is_too_short() {
    let review = ReviewInfo {
        reviewer: "J".to_owned(),
        ..ReviewInfo::default()
    };
    let report = validate_review(&review, 3.0);
    assert_eq!(
        report.error_for(Field::Reviewer).map(|e| e.violation.clone()),
        Some(Violation::ReviewerTooShort {
            min: REVIEWER_MIN_CHARS
        })
    );
}

fn quote(text: &str, page: Option<u32>) -> Quote {
    Quote {
        text: text.to_owned(),
        page,
    }
}

#[rstest]
fn empty_quote_list_is_reported_once() {
    let report = validate_quotes(&QuotesInfo { quotes: vec![] }, 300);
    assert_eq!(report.errors().len(), 1);
    assert_eq!(
        report.error_for(Field::Quotes).map(|e| e.violation.clone()),
        Some(Violation::QuotesEmpty)
    );
}

#[rstest]
#[case::blank("", Some("quote_text_required"))]
#[case::short("Yes.", Some("quote_text_too_short"))]
#[case::exact("Five!", None)]
fn quote_text_has_a_minimum_length(#[case] text: &str, #[case] code: Option<&str>) {
    let quotes = QuotesInfo {
        quotes: vec![quote(text, Some(10))],
    };
    let report = validate_quotes(&quotes, 300);
    assert_eq!(
        report
            .quote_error_for(0, Field::QuoteText)
            .map(|e| e.violation.code()),
        code
    );
}

#[rstest]
#[case::missing(None, Some("quote_page_required"))]
#[case::zero(Some(0), Some("quote_page_too_small"))]
#[case::beyond(Some(301), Some("quote_page_too_large"))]
#[case::first(Some(1), None)]
#[case::last(Some(300), None)]
fn quote_page_is_bounded_by_the_book(#[case] page: Option<u32>, #[case] code: Option<&str>) {
    let quotes = QuotesInfo {
        quotes: vec![quote("A memorable passage.", page)],
    };
    let report = validate_quotes(&quotes, 300);
    assert_eq!(
        report
            .quote_error_for(0, Field::QuotePage)
            .map(|e| e.violation.code()),
        code
    );
}

#[rstest]
fn unknown_page_count_suppresses_page_checks() {
    let quotes = QuotesInfo {
        quotes: vec![quote("A memorable passage.", None), quote("Hm.", Some(0))],
    };
    let report = validate_quotes(&quotes, 0);
    assert!(report.quote_error_for(0, Field::QuotePage).is_none());
    assert!(report.quote_error_for(1, Field::QuotePage).is_none());
    // Text rules still apply while page rules are suppressed.
    assert!(report.quote_error_for(1, Field::QuoteText).is_some());
}

#[rstest]
fn each_quote_entry_is_reported_under_its_own_index() {
    let quotes = QuotesInfo {
        quotes: vec![
            quote("Light is the left hand of darkness.", Some(16)),
            quote("", None),
        ],
    };
    let report = validate_quotes(&quotes, 300);
    assert!(report.quote_error_for(0, Field::QuoteText).is_none());
    let text_error = report.quote_error_for(1, Field::QuoteText);
    assert_eq!(text_error.map(FieldError::path), Some("quotes[1].text".to_owned()));
    let page_error = report.quote_error_for(1, Field::QuotePage);
    assert_eq!(page_error.map(FieldError::path), Some("quotes[1].page".to_owned()));
}

#[rstest]
fn visibility_always_validates() {
    assert!(validate_visibility(&VisibilityInfo::default()).is_valid());
}

#[rstest]
fn validate_step_supplies_cross_step_context() {
    let mut record = BookRecord::default();
    record.basic = complete_basic();
    record.rating.rating = 5.0;
    record.quotes.quotes = vec![quote("A memorable passage.", Some(999))];

    // The review step sees the rating from step 2.
    let review = validate_step(&record, Step::Review);
    assert_eq!(
        review.error_for(Field::Content).map(|e| e.violation.code()),
        Some("content_required")
    );

    // The quotes step sees the page count from step 1.
    let quotes = validate_step(&record, Step::Quotes);
    assert_eq!(
        quotes
            .quote_error_for(0, Field::QuotePage)
            .map(|e| e.violation.clone()),
        Some(Violation::QuotePageTooLarge { total: 496 })
    );
}

#[rstest]
fn evaluation_is_idempotent() {
    let basic = BasicInfo {
        reading_status: ReadingStatus::Reading,
        start_date: None,
        end_date: date(2026, 2, 1),
        ..BasicInfo::default()
    };
    let first = validate_basic(&basic);
    let second = validate_basic(&basic);
    assert_eq!(first, second);
}

#[rstest]
#[case(Field::ReadingStatus, &[Field::StartDate, Field::EndDate])]
#[case(Field::StartDate, &[Field::EndDate])]
#[case(Field::Rating, &[Field::Content, Field::Reviewer])]
#[case(Field::TotalPages, &[Field::QuotePage])]
#[case(Field::BookTitle, &[])]
fn dependency_graph_names_the_affected_fields(
    #[case] changed: Field,
    #[case] expected: &[Field],
) {
    assert_eq!(dependents(changed), expected);
}

#[rstest]
fn field_errors_serialize_with_path_code_and_message() {
    let report = validate_quotes(
        &QuotesInfo {
            quotes: vec![quote("", None)],
        },
        300,
    );
    let json = serde_json::to_value(&report).unwrap_or_default();
    assert_eq!(json["valid"], serde_json::json!(false));
    assert_eq!(json["errors"][0]["path"], serde_json::json!("quotes[0].text"));
    assert_eq!(json["errors"][0]["code"], serde_json::json!("quote_text_required"));
    assert_eq!(
        json["errors"][0]["message"],
        serde_json::json!("quote text is required")
    );
}
