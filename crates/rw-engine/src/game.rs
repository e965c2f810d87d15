//! The game facade: one case file, one config, one session.

use std::collections::BTreeMap;

use rw_core::{CaseFile, Character, Clue};
use tracing::info;

use crate::config::GameConfig;
use crate::dialogue::{self, ConversationOption, Resolution, StepView};
use crate::error::GameResult;
use crate::evidence::{self, EvidenceStatus, FindResult, SearchProgress};
use crate::journal::Journal;
use crate::ledger::{Category, ClueLedger, Statistics};
use crate::session::{Reveal, Screen, SearchRecord, Session, SessionId};
use crate::verdict::{self, Verdict};

/// A character as shown on the investigation hub.
#[derive(Debug, Clone, Copy)]
pub struct CharacterCard<'c> {
    /// The character.
    pub character: &'c Character,
    /// Conversations completed with them.
    pub questions_asked: usize,
    /// Whether the card should be shown as done.
    pub exhausted: bool,
}

/// A playable game. Every command and query goes through here.
#[derive(Debug, Clone)]
pub struct Game {
    case: CaseFile,
    config: GameConfig,
    session: Session,
}

impl Game {
    /// Start a game on a validated case file.
    pub fn new(case: CaseFile, config: GameConfig) -> Self {
        let session = Session::new();
        info!(
            session = %session.id(),
            case = %case.title,
            clue_threshold = config.clue_threshold,
            "game created"
        );
        Self {
            case,
            config,
            session,
        }
    }

    /// Start a game on the bundled Ravenswood case.
    pub fn ravenswood(config: GameConfig) -> GameResult<Self> {
        Ok(Self::new(CaseFile::ravenswood()?, config))
    }

    /// The case being played.
    pub fn case(&self) -> &CaseFile {
        &self.case
    }

    /// The rules in effect.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current playthrough state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current playthrough ID.
    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Switch screens.
    pub fn navigate(&mut self, screen: Screen) {
        self.session.navigate(screen);
    }

    /// Open a conversation with a character.
    pub fn start_conversation(
        &mut self,
        character_id: &str,
        conversation_id: &str,
    ) -> GameResult<StepView> {
        dialogue::start_conversation(&self.case, &mut self.session, character_id, conversation_id)
    }

    /// Pick a follow-up in an open conversation.
    pub fn choose_follow_up(
        &mut self,
        character_id: &str,
        conversation_id: &str,
        step_index: usize,
        follow_up_index: usize,
    ) -> GameResult<Resolution> {
        dialogue::choose_follow_up(
            &self.case,
            &mut self.session,
            character_id,
            conversation_id,
            step_index,
            follow_up_index,
        )
    }

    /// Search a location for an item.
    pub fn find_evidence(
        &mut self,
        location_id: &str,
        evidence_index: usize,
    ) -> GameResult<FindResult> {
        evidence::find_evidence(&self.case, &mut self.session, location_id, evidence_index)
    }

    /// Choose who to accuse.
    pub fn select_suspect(&mut self, character_id: &str) -> GameResult<()> {
        verdict::select_suspect(&self.case, &mut self.session, character_id)
    }

    /// Replace the written reasoning.
    pub fn set_reasoning(&mut self, text: &str) -> GameResult<()> {
        verdict::set_reasoning(&mut self.session, text)
    }

    /// Accuse the selected suspect and close the case.
    pub fn submit_deduction(&mut self, reasoning: Option<&str>) -> GameResult<Verdict> {
        verdict::submit_deduction(&self.case, &self.config, &mut self.session, reasoning)
    }

    /// Throw the session away and start over on the title screen.
    pub fn restart(&mut self) {
        let previous = self.session.id();
        self.session = Session::new();
        info!(previous = %previous, session = %self.session.id(), "game restarted");
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    /// The clue ledger.
    pub fn ledger(&self) -> &ClueLedger {
        self.session.ledger()
    }

    /// Collected clues in discovery order.
    pub fn clues(&self) -> &[Clue] {
        self.session.ledger().all()
    }

    /// Collected clues grouped by category.
    pub fn categorized_clues(&self) -> BTreeMap<Category, Vec<Clue>> {
        self.session.ledger().categorized()
    }

    /// Statistics over the collected clues.
    pub fn clue_statistics(&self) -> Statistics {
        self.session.ledger().analyze(self.config.clue_threshold)
    }

    /// A character's conversations with explored markers.
    pub fn conversations(&self, character_id: &str) -> GameResult<Vec<ConversationOption<'_>>> {
        dialogue::list_available_conversations(&self.case, &self.session, character_id)
    }

    /// The step awaiting a choice, if any.
    pub fn current_step(&self) -> Option<StepView> {
        dialogue::current_step(&self.case, &self.session)
    }

    /// Dialogue history with the current character.
    pub fn transcript(&self) -> &[Reveal] {
        self.session.transcript()
    }

    /// A location's items with found markers.
    pub fn evidence(&self, location_id: &str) -> GameResult<Vec<EvidenceStatus<'_>>> {
        evidence::list_evidence(&self.case, &self.session, location_id)
    }

    /// Whether every item at a location has been found.
    pub fn is_location_fully_searched(&self, location_id: &str) -> GameResult<bool> {
        evidence::is_location_fully_searched(&self.case, &self.session, location_id)
    }

    /// Found and total item counts at a location.
    pub fn search_progress(&self, location_id: &str) -> GameResult<SearchProgress> {
        evidence::search_progress(&self.case, &self.session, location_id)
    }

    /// First-time discoveries in order.
    pub fn searches(&self) -> &[SearchRecord] {
        self.session.searches()
    }

    /// Whether the deduction screen may be opened.
    pub fn deduction_unlocked(&self) -> bool {
        verdict::deduction_unlocked(&self.config, &self.session)
    }

    /// Whether an accusation could be submitted now.
    pub fn deduction_ready(&self) -> bool {
        verdict::deduction_ready(&self.config, &self.session)
    }

    /// Readiness message for the clue screen.
    pub fn deduction_hint(&self) -> String {
        verdict::deduction_hint(&self.config, &self.session)
    }

    /// The suspect currently chosen.
    pub fn selected_suspect(&self) -> Option<&str> {
        self.session.selected_suspect()
    }

    /// The written reasoning.
    pub fn reasoning(&self) -> &str {
        self.session.reasoning()
    }

    /// Whether the case is closed.
    pub fn is_completed(&self) -> bool {
        self.session.is_completed()
    }

    /// Conversations completed across all characters.
    pub fn questions_asked(&self) -> usize {
        self.session.questions_asked()
    }

    /// What is left of the nominal question budget.
    pub fn questions_remaining(&self) -> usize {
        self.config
            .question_budget
            .saturating_sub(self.session.questions_asked())
    }

    /// Every character with their progress markers, in display order.
    pub fn character_cards(&self) -> Vec<CharacterCard<'_>> {
        self.case
            .characters
            .iter()
            .map(|character| {
                let questions_asked = self
                    .session
                    .character_progress(&character.id)
                    .map_or(0, |p| p.questions_asked());
                let limit = self
                    .config
                    .exhausted_after
                    .unwrap_or(character.conversations.len());
                CharacterCard {
                    character,
                    questions_asked,
                    exhausted: questions_asked >= limit,
                }
            })
            .collect()
    }

    /// The action log.
    pub fn journal(&self) -> &Journal {
        self.session.journal()
    }
}
