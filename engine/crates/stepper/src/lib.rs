//! Linear wizard step primitives.
//!
//! A wizard is an ordered, fixed sequence of screens. This crate provides the
//! step-tracking half of such a flow: a [`LinearStep`] trait describing the
//! ordered sequence, a [`Stepper`] tracker enforcing bounded forward and
//! backward movement, and parsing helpers that turn raw step input (for
//! example a URL query parameter) into a typed step, normalizing anything
//! malformed to the first step.
//!
//! Access gating (which steps are reachable given accumulated form data) is
//! deliberately out of scope; callers layer that policy on top.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ordered, fixed sequence of wizard steps.
///
/// Ordinals are 1-based and contiguous: `FIRST` has ordinal 1 and `LAST` has
/// the highest ordinal. Implementations must keep `from_ordinal` and
/// `ordinal` consistent with each other.
///
/// # Examples
/// ```
/// use stepper::LinearStep;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Phase {
///     Intro,
///     Details,
///     Confirm,
/// }
///
/// impl LinearStep for Phase {
///     const FIRST: Self = Phase::Intro;
///     const LAST: Self = Phase::Confirm;
///
///     fn ordinal(self) -> u8 {
///         match self {
///             Phase::Intro => 1,
///             Phase::Details => 2,
///             Phase::Confirm => 3,
///         }
///     }
///
///     fn from_ordinal(ordinal: u8) -> Option<Self> {
///         match ordinal {
///             1 => Some(Phase::Intro),
///             2 => Some(Phase::Details),
///             3 => Some(Phase::Confirm),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Phase::Intro.next(), Some(Phase::Details));
/// assert_eq!(Phase::Confirm.next(), None);
/// assert_eq!(Phase::total(), 3);
/// ```
pub trait LinearStep: Copy + Eq + Sized {
    /// The first step of the sequence (ordinal 1).
    const FIRST: Self;
    /// The last step of the sequence (highest ordinal).
    const LAST: Self;

    /// 1-based position of this step in the sequence.
    #[must_use]
    fn ordinal(self) -> u8;

    /// Look a step up by its 1-based ordinal.
    #[must_use]
    fn from_ordinal(ordinal: u8) -> Option<Self>;

    /// The step after this one, if any.
    #[must_use]
    fn next(self) -> Option<Self> {
        self.ordinal().checked_add(1).and_then(Self::from_ordinal)
    }

    /// The step before this one, if any.
    #[must_use]
    fn previous(self) -> Option<Self> {
        self.ordinal().checked_sub(1).and_then(Self::from_ordinal)
    }

    /// Whether this is the first step.
    #[must_use]
    fn is_first(self) -> bool {
        self == Self::FIRST
    }

    /// Whether this is the last step.
    #[must_use]
    fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Number of steps in the sequence.
    #[must_use]
    fn total() -> u8 {
        Self::LAST.ordinal()
    }
}

/// Errors returned when parsing raw step input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseStepError {
    /// Input was empty or not an unsigned integer.
    #[error("step must be a number, got {input:?}")]
    NotNumeric {
        /// The rejected raw input.
        input: String,
    },
    /// Input parsed, but names no step in the sequence.
    #[error("step {ordinal} is out of range (1..={last})")]
    OutOfRange {
        /// The rejected ordinal.
        ordinal: u8,
        /// Highest valid ordinal.
        last: u8,
    },
}

/// Parse raw step input into a typed step.
///
/// Surrounding whitespace is tolerated; anything non-numeric or outside the
/// sequence is rejected with a typed error.
///
/// # Errors
/// Returns [`ParseStepError`] when the input is not a number or names no
/// step.
pub fn parse_step<S: LinearStep>(raw: &str) -> Result<S, ParseStepError> {
    let ordinal: u8 = raw
        .trim()
        .parse()
        .map_err(|_| ParseStepError::NotNumeric {
            input: raw.to_owned(),
        })?;
    S::from_ordinal(ordinal).ok_or(ParseStepError::OutOfRange {
        ordinal,
        last: S::total(),
    })
}

/// Normalize raw step input, mapping anything malformed to the first step.
///
/// Missing, non-numeric, and out-of-range input all silently become
/// [`LinearStep::FIRST`]; malformed navigation input is not a user-visible
/// error.
///
/// # Examples
/// ```
/// use stepper::{LinearStep, normalize_step};
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// # enum Phase { One, Two }
/// # impl LinearStep for Phase {
/// #     const FIRST: Self = Phase::One;
/// #     const LAST: Self = Phase::Two;
/// #     fn ordinal(self) -> u8 { match self { Phase::One => 1, Phase::Two => 2 } }
/// #     fn from_ordinal(ordinal: u8) -> Option<Self> {
/// #         match ordinal { 1 => Some(Phase::One), 2 => Some(Phase::Two), _ => None }
/// #     }
/// # }
/// assert_eq!(normalize_step::<Phase>(Some("2")), Phase::Two);
/// assert_eq!(normalize_step::<Phase>(Some("abc")), Phase::One);
/// assert_eq!(normalize_step::<Phase>(Some("9")), Phase::One);
/// assert_eq!(normalize_step::<Phase>(None), Phase::One);
/// ```
#[must_use]
pub fn normalize_step<S: LinearStep>(raw: Option<&str>) -> S {
    raw.and_then(|text| parse_step(text).ok()).unwrap_or(S::FIRST)
}

/// Tracker holding the active step of a linear wizard.
///
/// Movement is bounded: `advance` stops at the last step and `retreat` at the
/// first. Direct jumps take a typed step, so out-of-range targets are
/// unrepresentable; raw input goes through [`Stepper::resume`] or
/// [`normalize_step`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stepper<S: LinearStep> {
    current: S,
}

impl<S: LinearStep> Stepper<S> {
    /// Start a tracker at the first step.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: S::FIRST }
    }

    /// Start a tracker at the given step.
    #[must_use]
    pub const fn at(step: S) -> Self {
        Self { current: step }
    }

    /// Start a tracker from a persisted raw step representation.
    ///
    /// Malformed input resumes at the first step, matching
    /// [`normalize_step`].
    #[must_use]
    pub fn resume(raw: Option<&str>) -> Self {
        Self::at(normalize_step(raw))
    }

    /// The active step.
    #[must_use]
    pub const fn current(&self) -> S {
        self.current
    }

    /// Move one step forward. Returns `false` when already on the last step.
    pub fn advance(&mut self) -> bool {
        let Some(next) = self.current.next() else {
            return false;
        };
        self.current = next;
        true
    }

    /// Move one step backward. Returns `false` when already on the first
    /// step.
    pub fn retreat(&mut self) -> bool {
        let Some(previous) = self.current.previous() else {
            return false;
        };
        self.current = previous;
        true
    }

    /// Jump directly to the given step.
    pub const fn jump(&mut self, step: S) {
        self.current = step;
    }

    /// Whether the tracker sits on the first step.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current.is_first()
    }

    /// Whether the tracker sits on the last step.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current.is_last()
    }
}

impl<S: LinearStep> Default for Stepper<S> {
    fn default() -> Self {
        Self::new()
    }
}
