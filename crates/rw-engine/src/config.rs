//! Configuration for a playthrough.

use serde::{Deserialize, Serialize};

/// Tunable rules for a playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Clues needed before an accusation can be made.
    pub clue_threshold: usize,
    /// Whether a written reasoning must accompany the accusation.
    pub reasoning: ReasoningPolicy,
    /// Total questions the player is nominally allowed. Informational only.
    pub question_budget: usize,
    /// Completed conversations after which a character card is marked done.
    /// `None` means all of that character's conversations.
    pub exhausted_after: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            clue_threshold: 8,
            reasoning: ReasoningPolicy::Optional,
            question_budget: 30,
            exhausted_after: None,
        }
    }
}

impl GameConfig {
    /// Set the clue threshold.
    pub fn with_clue_threshold(mut self, threshold: usize) -> Self {
        self.clue_threshold = threshold;
        self
    }

    /// Require a written reasoning longer than `min_chars` characters.
    pub fn with_reasoning_required(mut self, min_chars: usize) -> Self {
        self.reasoning = ReasoningPolicy::Required { min_chars };
        self
    }

    /// Set the question budget.
    pub fn with_question_budget(mut self, budget: usize) -> Self {
        self.question_budget = budget;
        self
    }

    /// Mark character cards done after this many completed conversations.
    pub fn with_exhausted_after(mut self, count: usize) -> Self {
        self.exhausted_after = Some(count);
        self
    }
}

/// How the accusation's free-text reasoning is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ReasoningPolicy {
    /// Reasoning may be empty.
    Optional,
    /// Trimmed reasoning must be longer than `min_chars` characters.
    Required {
        /// Exclusive lower bound on character count.
        min_chars: usize,
    },
}

impl ReasoningPolicy {
    /// Whether `text` satisfies this policy.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Optional => true,
            Self::Required { min_chars } => text.trim().chars().count() > *min_chars,
        }
    }

    /// Characters the trimmed reasoning must exceed; zero when optional.
    pub fn min_chars(&self) -> usize {
        match self {
            Self::Optional => 0,
            Self::Required { min_chars } => *min_chars,
        }
    }
}
