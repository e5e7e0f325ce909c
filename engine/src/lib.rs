//! Book-review form engine.
//!
//! A five-step submission flow (basic info, rating, written review, quotes,
//! visibility) assembling one [`domain::BookRecord`]. The crate owns the
//! cross-step validation rule table and the navigation-gating state machine;
//! rendering, routing, and storage are external collaborators talking to the
//! engine through [`domain::ports`].

pub mod domain;

pub use domain::session::FormSession;
