//! Public/private flag on the completed record.

use serde::{Deserialize, Serialize};

/// Who may see the finished review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Visible to other readers.
    #[default]
    Public,
    /// Visible to the author only.
    Private,
}

impl Visibility {
    /// Returns the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown visibility string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVisibilityError {
    /// The unrecognised input value.
    pub input: String,
}

impl std::fmt::Display for ParseVisibilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown visibility: {}", self.input)
    }
}

impl std::error::Error for ParseVisibilityError {}

impl std::str::FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(ParseVisibilityError {
                input: s.to_owned(),
            }),
        }
    }
}
