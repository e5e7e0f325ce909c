//! Reading status of the reviewed book.
//!
//! The status gates the date rules on the basic-info step: it decides whether
//! the reading period fields are required, optional, or forbidden.

use serde::{Deserialize, Serialize};

/// Progress through the book.
///
/// The serialized values are the Korean strings the form has always stored;
/// [`ReadingStatus::label`] provides the English wording used in validation
/// messages.
///
/// # Examples
///
/// ```
/// use review_engine::domain::ReadingStatus;
///
/// let json = serde_json::to_string(&ReadingStatus::Reading).expect("serialise");
/// assert_eq!(json, "\"읽는중\"");
/// assert!(ReadingStatus::Reading.requires_start_date());
/// assert!(!ReadingStatus::Reading.allows_end_date());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReadingStatus {
    /// On the wish list; no reading period yet.
    #[default]
    #[serde(rename = "읽고싶은책")]
    WantToRead,
    /// Currently being read.
    #[serde(rename = "읽는중")]
    Reading,
    /// Finished.
    #[serde(rename = "읽음")]
    Read,
    /// Started but set aside.
    #[serde(rename = "보류중")]
    OnHold,
}

impl ReadingStatus {
    /// Returns the canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WantToRead => "읽고싶은책",
            Self::Reading => "읽는중",
            Self::Read => "읽음",
            Self::OnHold => "보류중",
        }
    }

    /// English label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WantToRead => "want-to-read",
            Self::Reading => "reading",
            Self::Read => "read",
            Self::OnHold => "on-hold",
        }
    }

    /// Whether a start date must be present for this status.
    pub fn requires_start_date(&self) -> bool {
        matches!(self, Self::Reading | Self::Read | Self::OnHold)
    }

    /// Whether an end date must be present for this status.
    pub fn requires_end_date(&self) -> bool {
        matches!(self, Self::Read)
    }

    /// Whether an end date may be present at all.
    ///
    /// Only a finished book carries an end date; every other status forbids
    /// it.
    pub fn allows_end_date(&self) -> bool {
        matches!(self, Self::Read)
    }

    /// Whether any reading-period date may be present.
    pub fn allows_dates(&self) -> bool {
        !matches!(self, Self::WantToRead)
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown reading status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReadingStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseReadingStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown reading status: {}", self.input)
    }
}

impl std::error::Error for ParseReadingStatusError {}

impl std::str::FromStr for ReadingStatus {
    type Err = ParseReadingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "읽고싶은책" => Ok(Self::WantToRead),
            "읽는중" => Ok(Self::Reading),
            "읽음" => Ok(Self::Read),
            "보류중" => Ok(Self::OnHold),
            _ => Err(ParseReadingStatusError {
                input: s.to_owned(),
            }),
        }
    }
}
