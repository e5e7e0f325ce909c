//! The five ordered form steps.

use stepper::LinearStep;

/// One of the five sequential screens, each collecting a disjoint
/// sub-record of the review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Step 1: book metadata, status, and reading period.
    Basic,
    /// Step 2: recommendation and star rating.
    Rating,
    /// Step 3: the written review.
    Review,
    /// Step 4: collected quotes.
    Quotes,
    /// Step 5: visibility choice.
    Visibility,
}

impl Step {
    /// All steps in order.
    pub const ALL: [Self; 5] = [
        Self::Basic,
        Self::Rating,
        Self::Review,
        Self::Quotes,
        Self::Visibility,
    ];

    /// Screen name of the step.
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "BasicInfo",
            Self::Rating => "Rating",
            Self::Review => "Review",
            Self::Quotes => "Quotation",
            Self::Visibility => "SharingOption",
        }
    }

    /// 1-based step number, the value shown in the shareable location.
    pub fn number(self) -> u8 {
        self.ordinal()
    }
}

impl LinearStep for Step {
    const FIRST: Self = Self::Basic;
    const LAST: Self = Self::Visibility;

    fn ordinal(self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::Rating => 2,
            Self::Review => 3,
            Self::Quotes => 4,
            Self::Visibility => 5,
        }
    }

    fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1 => Some(Self::Basic),
            2 => Some(Self::Rating),
            3 => Some(Self::Review),
            4 => Some(Self::Quotes),
            5 => Some(Self::Visibility),
            _ => None,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
