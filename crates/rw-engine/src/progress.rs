//! Per-character interrogation progress.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Tracks which of a character's conversations the player has opened,
/// which branches they took, and which conversations they finished.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProgress {
    /// Conversations completed at least once.
    questions_asked: usize,
    /// Conversations that have been opened.
    started: HashSet<String>,
    /// Follow-ups taken, as (step, follow-up) pairs per conversation.
    choices: HashMap<String, HashSet<(usize, usize)>>,
    /// Conversations that reached an end.
    completed: BTreeSet<String>,
}

impl CharacterProgress {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a conversation as opened.
    pub fn mark_started(&mut self, conversation_id: impl Into<String>) {
        self.started.insert(conversation_id.into());
    }

    /// Whether a conversation has been opened.
    pub fn has_started(&self, conversation_id: &str) -> bool {
        self.started.contains(conversation_id)
    }

    /// Record a follow-up taken at a step.
    pub fn mark_choice(&mut self, conversation_id: impl Into<String>, step: usize, follow_up: usize) {
        self.choices
            .entry(conversation_id.into())
            .or_default()
            .insert((step, follow_up));
    }

    /// Whether a specific follow-up has been taken.
    pub fn has_chosen(&self, conversation_id: &str, step: usize, follow_up: usize) -> bool {
        self.choices
            .get(conversation_id)
            .is_some_and(|taken| taken.contains(&(step, follow_up)))
    }

    /// Mark a conversation completed. Returns true the first time only, and
    /// only then counts it as an asked question.
    pub fn mark_completed(&mut self, conversation_id: impl Into<String>) -> bool {
        let newly = self.completed.insert(conversation_id.into());
        if newly {
            self.questions_asked += 1;
        }
        newly
    }

    /// Whether a conversation has been completed.
    pub fn is_completed(&self, conversation_id: &str) -> bool {
        self.completed.contains(conversation_id)
    }

    /// Completed conversation IDs, sorted.
    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    /// How many conversations have been completed.
    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }
}
