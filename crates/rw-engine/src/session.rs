//! Mutable state of a single playthrough.
//!
//! A [`Session`] starts empty and is only ever mutated through the dialogue,
//! evidence, and verdict operations. Restarting a game throws the whole
//! session away and builds a new one; nothing carries over.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use rw_core::Clue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{GameError, GameResult};
use crate::journal::{Journal, JournalEntry};
use crate::ledger::ClueLedger;
use crate::progress::CharacterProgress;

/// Identifier of one playthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Which screen the presentation layer should show. The engine sets it on
/// the transitions the game defines but never branches on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Title card.
    #[default]
    Title,
    /// Main investigation hub.
    Game,
    /// Talking to a character.
    Dialog,
    /// Clue list.
    Clues,
    /// Choosing a suspect.
    Deduction,
    /// The verdict.
    Result,
}

/// One item of a reveal sequence, in the order it becomes visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reveal {
    /// Opening line of a conversation.
    Entry(String),
    /// What the player asked or chose.
    Question(String),
    /// What the character said.
    Answer {
        /// Speaker's display name.
        speaker: String,
        /// The line.
        text: String,
    },
    /// A clue surfaced by the preceding answer.
    Clue(Clue),
}

/// A first-time evidence discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Location searched.
    pub location_id: String,
    /// Index of the evidence found.
    pub evidence_index: usize,
    /// Evidence name at the time it was found.
    pub evidence_name: String,
}

/// The conversation currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveConversation {
    /// Character being questioned.
    pub character_id: String,
    /// Conversation in progress.
    pub conversation_id: String,
    /// Step currently shown.
    pub step: usize,
}

/// All mutable state of one playthrough.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) screen: Screen,
    pub(crate) ledger: ClueLedger,
    pub(crate) characters: HashMap<String, CharacterProgress>,
    pub(crate) questions_asked: usize,
    pub(crate) active: Option<ActiveConversation>,
    pub(crate) transcript: Vec<Reveal>,
    pub(crate) transcript_character: Option<String>,
    pub(crate) found: HashMap<String, BTreeSet<usize>>,
    pub(crate) searches: Vec<SearchRecord>,
    pub(crate) selected_suspect: Option<String>,
    pub(crate) reasoning: String,
    pub(crate) completed: bool,
    pub(crate) journal: Journal,
}

impl Session {
    /// Create a fresh session with every collection empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// This playthrough's ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current screen token.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Move to another screen.
    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Collected clues.
    pub fn ledger(&self) -> &ClueLedger {
        &self.ledger
    }

    /// Interrogation progress for a character, if they have been questioned.
    pub fn character_progress(&self, character_id: &str) -> Option<&CharacterProgress> {
        self.characters.get(character_id)
    }

    /// Conversations completed across all characters.
    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }

    /// The conversation currently open, if any.
    pub fn active_conversation(&self) -> Option<&ActiveConversation> {
        self.active.as_ref()
    }

    /// Everything revealed while talking to the current character.
    pub fn transcript(&self) -> &[Reveal] {
        &self.transcript
    }

    /// The character the transcript belongs to.
    pub fn transcript_character(&self) -> Option<&str> {
        self.transcript_character.as_deref()
    }

    /// Evidence indices found at a location, ascending.
    pub fn found_at(&self, location_id: &str) -> Vec<usize> {
        self.found
            .get(location_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether a specific evidence item has been found.
    pub fn is_found(&self, location_id: &str, index: usize) -> bool {
        self.found
            .get(location_id)
            .is_some_and(|set| set.contains(&index))
    }

    /// First-time discoveries in the order they happened.
    pub fn searches(&self) -> &[SearchRecord] {
        &self.searches
    }

    /// The suspect currently chosen.
    pub fn selected_suspect(&self) -> Option<&str> {
        self.selected_suspect.as_deref()
    }

    /// The player's written reasoning.
    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Whether a verdict has been delivered.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Action log.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Reject mutations once the case is closed.
    pub(crate) fn ensure_open(&self) -> GameResult<()> {
        if self.completed {
            Err(GameError::GameCompleted)
        } else {
            Ok(())
        }
    }

    pub(crate) fn progress_mut(&mut self, character_id: &str) -> &mut CharacterProgress {
        self.characters.entry(character_id.to_string()).or_default()
    }

    /// Add a clue to the ledger, journaling it if it was new.
    pub(crate) fn record_clue(&mut self, clue: Clue) -> bool {
        let title = clue.title.clone();
        let source = clue.source.clone();
        let added = self.ledger.add(clue);
        if added {
            self.journal
                .record(JournalEntry::ClueRecorded { title, source });
        }
        added
    }
}
