//! Error types for the investigation engine.

use std::fmt;

use rw_core::ContentError;
use thiserror::Error;

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;

/// Errors that can occur while playing a case.
///
/// Every variant is recoverable: the presentation layer reports it and
/// re-prompts the player. Use [`GameError::kind`] to branch on the broad
/// category.
#[derive(Debug, Error)]
pub enum GameError {
    /// Character, location, or conversation lookup failed.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// The conversation has no step at this index.
    #[error("step {step} not found in conversation {conversation}")]
    StepNotFound {
        /// Conversation ID.
        conversation: String,
        /// Requested step index.
        step: usize,
    },

    /// The step has no follow-up at this index.
    #[error("follow-up {follow_up} not found at step {step} of conversation {conversation}")]
    FollowUpNotFound {
        /// Conversation ID.
        conversation: String,
        /// Step index.
        step: usize,
        /// Requested follow-up index.
        follow_up: usize,
    },

    /// The conversation is not open at the given step.
    #[error("conversation {conversation} is not waiting at step {step}")]
    ConversationNotActive {
        /// Conversation ID.
        conversation: String,
        /// Step the choice was made at.
        step: usize,
    },

    /// The location has no evidence at this index.
    #[error("evidence {index} not found at location {location}")]
    EvidenceNotFound {
        /// Location ID.
        location: String,
        /// Requested evidence index.
        index: usize,
    },

    /// A deduction was submitted before a suspect was chosen.
    #[error("no suspect selected")]
    NoSuspectSelected,

    /// The case is already closed; restart to play again.
    #[error("the case is closed")]
    GameCompleted,

    /// The written reasoning is shorter than the configured minimum.
    #[error("reasoning too short: {chars} character(s), need more than {min}")]
    ReasoningTooShort {
        /// Characters supplied (after trimming).
        chars: usize,
        /// Minimum that must be exceeded.
        min: usize,
    },
}

/// Broad error categories the presentation layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An unknown ID: a content-authoring defect.
    NotFound,
    /// The action's precondition does not hold yet (or anymore).
    InvalidState,
    /// Player input or content failed validation.
    ValidationFailed,
}

impl GameError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Content(ContentError::Parse(_) | ContentError::Invalid(_)) => {
                ErrorKind::ValidationFailed
            }
            Self::Content(_)
            | Self::StepNotFound { .. }
            | Self::FollowUpNotFound { .. }
            | Self::EvidenceNotFound { .. } => ErrorKind::NotFound,
            Self::NoSuspectSelected | Self::GameCompleted | Self::ConversationNotActive { .. } => {
                ErrorKind::InvalidState
            }
            Self::ReasoningTooShort { .. } => ErrorKind::ValidationFailed,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::InvalidState => write!(f, "invalid state"),
            Self::ValidationFailed => write!(f, "validation failed"),
        }
    }
}
