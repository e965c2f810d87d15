//! Investigation engine for Ravenswood.
//!
//! Tracks a single playthrough of a [`rw_core::CaseFile`]: conversations
//! walked, evidence found, clues collected, and the final accusation. The
//! [`Game`] facade owns the case, the [`GameConfig`], and the [`Session`],
//! and is the usual entry point; the engine modules expose the same
//! operations as free functions over borrowed state.
//!
//! Everything is synchronous. Display pacing is left to the caller, which
//! receives ordered [`Reveal`] sequences instead of timers.

/// Tunable rules.
pub mod config;
/// Conversation trees.
pub mod dialogue;
/// Error types used throughout the crate.
pub mod error;
/// Location searches.
pub mod evidence;
/// The game facade.
pub mod game;
/// Chronological action log.
pub mod journal;
/// Clue storage, categorization, and statistics.
pub mod ledger;
/// Per-character interrogation progress.
pub mod progress;
/// Playthrough state.
pub mod session;
/// Gating and the final accusation.
pub mod verdict;

pub use config::{GameConfig, ReasoningPolicy};
pub use dialogue::{ConversationOption, Resolution, StepView, TerminalView};
pub use error::{ErrorKind, GameError, GameResult};
pub use evidence::{EvidenceStatus, FindResult, SearchProgress};
pub use game::{CharacterCard, Game};
pub use journal::{Journal, JournalEntry, JournalRecord};
pub use ledger::{Category, ClueLedger, EMPTY_LEDGER_TEXT, Readiness, Statistics};
pub use progress::CharacterProgress;
pub use session::{ActiveConversation, Reveal, Screen, SearchRecord, Session, SessionId};
pub use verdict::Verdict;
