//! Case file model for Ravenswood.
//!
//! Defines the static content of a mystery: characters and their
//! conversation trees, searchable locations with evidence, clues, and the
//! fixed solution. A [`CaseFile`] is loaded once, validated, and then only
//! read; all playthrough state lives in `rw-engine`.

/// The case file and its lookups.
pub mod case;
/// Characters, conversations, steps, and follow-ups.
pub mod character;
/// Clues and clue tags.
pub mod clue;
/// Error types used throughout the crate.
pub mod error;
/// Locations and evidence.
pub mod location;
/// Structural validation of case files.
pub mod validate;

pub use case::{CaseFile, Solution};
pub use character::{Character, Conversation, FollowUp, FollowUpOutcome, Step};
pub use clue::{Clue, ClueTag};
pub use error::{ContentError, ContentResult};
pub use location::{Evidence, Location, Position};
pub use validate::ValidationIssue;
