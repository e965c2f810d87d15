//! Dialogue engine: walking a character's conversation trees.
//!
//! A conversation moves from not-started, through one or more steps, to
//! completed. Presenting a step without follow-ups completes it, and so
//! does choosing a `Respond` follow-up. Completion is counted once; a
//! completed conversation may be reopened and replays from step 0.

use rw_core::{CaseFile, Character, Clue, Conversation, FollowUpOutcome, Step};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{GameError, GameResult};
use crate::journal::JournalEntry;
use crate::session::{ActiveConversation, Reveal, Screen, Session};

/// A conversation offered on a character's dialogue screen.
#[derive(Debug, Clone, Copy)]
pub struct ConversationOption<'c> {
    /// The conversation.
    pub conversation: &'c Conversation,
    /// Whether the player has already completed it.
    pub explored: bool,
}

/// What the player sees at one step of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    /// Character being questioned.
    pub character_id: String,
    /// Their display name.
    pub speaker: String,
    /// Conversation in progress.
    pub conversation_id: String,
    /// Index of this step.
    pub step_index: usize,
    /// Opening line, only on the step that opened the conversation.
    pub entry: Option<String>,
    /// What the player asks.
    pub question: Option<String>,
    /// The character's answer.
    pub answer: String,
    /// Clue revealed after the answer.
    pub clue: Option<Clue>,
    /// Follow-up choice labels, in order.
    pub follow_ups: Vec<String>,
}

impl StepView {
    fn new(character: &Character, conversation: &Conversation, index: usize, step: &Step) -> Self {
        Self {
            character_id: character.id.clone(),
            speaker: character.name.clone(),
            conversation_id: conversation.id.clone(),
            step_index: index,
            entry: None,
            question: step.question.clone(),
            answer: step.answer.clone(),
            clue: step.clue.clone(),
            follow_ups: step.follow_ups.iter().map(|f| f.text.clone()).collect(),
        }
    }

    /// Whether the conversation ends at this step.
    pub fn is_terminal(&self) -> bool {
        self.follow_ups.is_empty()
    }

    /// The step's content in display order: entry, question, answer, clue.
    pub fn reveals(&self) -> Vec<Reveal> {
        let mut out = Vec::with_capacity(4);
        if let Some(entry) = &self.entry {
            out.push(Reveal::Entry(entry.clone()));
        }
        if let Some(question) = &self.question {
            out.push(Reveal::Question(question.clone()));
        }
        out.push(Reveal::Answer {
            speaker: self.speaker.clone(),
            text: self.answer.clone(),
        });
        if let Some(clue) = &self.clue {
            out.push(Reveal::Clue(clue.clone()));
        }
        out
    }
}

/// The closing exchange of a conversation ended by a `Respond` follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminalView {
    /// Character questioned.
    pub character_id: String,
    /// Their display name.
    pub speaker: String,
    /// Conversation that ended.
    pub conversation_id: String,
    /// The follow-up text the player chose.
    pub choice: String,
    /// The character's closing reply.
    pub response: String,
    /// Clue revealed after the reply.
    pub clue: Option<Clue>,
}

impl TerminalView {
    /// Choice, reply, then clue.
    pub fn reveals(&self) -> Vec<Reveal> {
        let mut out = vec![
            Reveal::Question(self.choice.clone()),
            Reveal::Answer {
                speaker: self.speaker.clone(),
                text: self.response.clone(),
            },
        ];
        if let Some(clue) = &self.clue {
            out.push(Reveal::Clue(clue.clone()));
        }
        out
    }
}

/// Result of choosing a follow-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// The conversation continues at another step.
    Step(StepView),
    /// The conversation ended.
    Terminal(TerminalView),
}

impl Resolution {
    /// Whether the conversation is over.
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Step(view) => view.is_terminal(),
            Self::Terminal(_) => true,
        }
    }

    /// Reveal sequence of whichever view this is.
    pub fn reveals(&self) -> Vec<Reveal> {
        match self {
            Self::Step(view) => view.reveals(),
            Self::Terminal(view) => view.reveals(),
        }
    }
}

/// A character's conversations with their explored markers.
pub fn list_available_conversations<'c>(
    case: &'c CaseFile,
    session: &Session,
    character_id: &str,
) -> GameResult<Vec<ConversationOption<'c>>> {
    let character = case.character(character_id)?;
    let progress = session.character_progress(character_id);
    Ok(character
        .conversations
        .iter()
        .map(|conversation| ConversationOption {
            conversation,
            explored: progress.is_some_and(|p| p.is_completed(&conversation.id)),
        })
        .collect())
}

/// Open a conversation at step 0.
///
/// Switching to a different character, or coming back from another screen,
/// starts a fresh transcript.
pub fn start_conversation(
    case: &CaseFile,
    session: &mut Session,
    character_id: &str,
    conversation_id: &str,
) -> GameResult<StepView> {
    session.ensure_open()?;
    let character = case.character(character_id)?;
    let conversation = case.conversation(character_id, conversation_id)?;

    let same_character = session.transcript_character.as_deref() == Some(character_id);
    if session.screen != Screen::Dialog || !same_character {
        session.transcript.clear();
        session.transcript_character = Some(character.id.clone());
    }

    info!(
        session = %session.id,
        character = character_id,
        conversation = conversation_id,
        "conversation started"
    );
    session.screen = Screen::Dialog;
    session.progress_mut(character_id).mark_started(conversation_id);

    let entry = Some(conversation.entry.clone()).filter(|e| !e.is_empty());
    present_step(session, character, conversation, 0, entry)
}

/// Take follow-up `follow_up_index` at step `step_index`.
///
/// The conversation must be open and waiting at `step_index`; choices at
/// steps the player is not looking at are rejected.
pub fn choose_follow_up(
    case: &CaseFile,
    session: &mut Session,
    character_id: &str,
    conversation_id: &str,
    step_index: usize,
    follow_up_index: usize,
) -> GameResult<Resolution> {
    session.ensure_open()?;
    let character = case.character(character_id)?;
    let conversation = case.conversation(character_id, conversation_id)?;
    let step = conversation
        .step(step_index)
        .ok_or_else(|| GameError::StepNotFound {
            conversation: conversation_id.to_string(),
            step: step_index,
        })?;
    let follow_up =
        step.follow_ups
            .get(follow_up_index)
            .ok_or_else(|| GameError::FollowUpNotFound {
                conversation: conversation_id.to_string(),
                step: step_index,
                follow_up: follow_up_index,
            })?;

    let waiting_here = session.active.as_ref().is_some_and(|a| {
        a.character_id == character_id
            && a.conversation_id == conversation_id
            && a.step == step_index
    });
    if !waiting_here {
        warn!(
            conversation = conversation_id,
            step = step_index,
            "follow-up chosen outside the open step"
        );
        return Err(GameError::ConversationNotActive {
            conversation: conversation_id.to_string(),
            step: step_index,
        });
    }

    session
        .progress_mut(character_id)
        .mark_choice(conversation_id, step_index, follow_up_index);
    debug!(
        conversation = conversation_id,
        step = step_index,
        follow_up = follow_up_index,
        "follow-up chosen"
    );

    match &follow_up.outcome {
        FollowUpOutcome::Jump { next_step } => {
            present_step(session, character, conversation, *next_step, None).map(Resolution::Step)
        }
        FollowUpOutcome::Respond { response, clue } => {
            let view = TerminalView {
                character_id: character.id.clone(),
                speaker: character.name.clone(),
                conversation_id: conversation.id.clone(),
                choice: follow_up.text.clone(),
                response: response.clone(),
                clue: clue.clone(),
            };
            session.transcript.extend(view.reveals());
            if let Some(clue) = clue {
                session.record_clue(clue.clone());
            }
            complete(session, character, conversation);
            Ok(Resolution::Terminal(view))
        }
    }
}

/// The step awaiting a follow-up choice, if a conversation is open.
pub fn current_step(case: &CaseFile, session: &Session) -> Option<StepView> {
    let active = session.active.as_ref()?;
    let character = case.character(&active.character_id).ok()?;
    let conversation = character.conversation(&active.conversation_id)?;
    let step = conversation.step(active.step)?;
    Some(StepView::new(character, conversation, active.step, step))
}

fn present_step(
    session: &mut Session,
    character: &Character,
    conversation: &Conversation,
    index: usize,
    entry: Option<String>,
) -> GameResult<StepView> {
    let step = conversation
        .step(index)
        .ok_or_else(|| GameError::StepNotFound {
            conversation: conversation.id.clone(),
            step: index,
        })?;

    let mut view = StepView::new(character, conversation, index, step);
    view.entry = entry;

    session.active = Some(ActiveConversation {
        character_id: character.id.clone(),
        conversation_id: conversation.id.clone(),
        step: index,
    });
    session.transcript.extend(view.reveals());
    if let Some(clue) = &step.clue {
        session.record_clue(clue.clone());
    }
    if step.is_terminal() {
        complete(session, character, conversation);
    }
    Ok(view)
}

/// Close the active conversation, counting it the first time only.
fn complete(session: &mut Session, character: &Character, conversation: &Conversation) {
    session.active = None;
    if !session.progress_mut(&character.id).mark_completed(&conversation.id) {
        debug!(conversation = %conversation.id, "conversation replayed");
        return;
    }
    session.questions_asked += 1;
    session.journal.record(JournalEntry::ConversationCompleted {
        character: character.name.clone(),
        label: conversation.label.clone(),
    });
    info!(
        session = %session.id,
        character = %character.id,
        conversation = %conversation.id,
        questions_asked = session.questions_asked,
        "conversation completed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rw_core::{FollowUp, Solution};

    fn case() -> CaseFile {
        let butler = Character::new("bates", "贝茨", "管家")
            .with_conversation(
                Conversation::new("keys", "钥匙")
                    .with_entry("贝茨站直了身子。")
                    .with_step(
                        Step::new("钥匙一直在我身上。")
                            .with_question("钥匙在哪里？")
                            .with_clue(Clue::new("钥匙线索", "只有两把钥匙", "与贝茨的对话"))
                            .with_follow_up(FollowUp::jump("还有谁？", 1))
                            .with_follow_up(FollowUp::respond("谢谢。", "不客气。")),
                    )
                    .with_step(
                        Step::new("只有老爷。")
                            .with_follow_up(FollowUp::jump("再说一遍", 0))
                            .with_follow_up(FollowUp::respond_with_clue(
                                "确定吗？",
                                "确定。",
                                Clue::new("另一把钥匙", "老爷有一把", "与贝茨的对话"),
                            )),
                    ),
            )
            .with_conversation(Conversation::flat("where", "你在哪？", "厨房。", None));
        let maid = Character::new("harris", "哈里斯", "女仆")
            .with_conversation(Conversation::flat("h1", "看到什么？", "没有。", None));
        CaseFile {
            title: "test".into(),
            characters: vec![butler, maid],
            locations: Vec::new(),
            solution: Solution::new("bates"),
        }
    }

    #[test]
    fn start_returns_step_zero_with_entry() {
        let case = case();
        let mut s = Session::new();
        let view = start_conversation(&case, &mut s, "bates", "keys").unwrap();

        assert_eq!(view.step_index, 0);
        assert_eq!(view.follow_ups, vec!["还有谁？", "谢谢。"]);
        assert!(!view.is_terminal());
        assert_eq!(s.screen(), Screen::Dialog);
        assert_eq!(s.ledger().len(), 1);
        assert_eq!(s.active_conversation().unwrap().step, 0);

        let reveals = view.reveals();
        assert!(matches!(reveals[0], Reveal::Entry(_)));
        assert!(matches!(reveals[1], Reveal::Question(_)));
        assert!(matches!(reveals[2], Reveal::Answer { .. }));
        assert!(matches!(reveals[3], Reveal::Clue(_)));
        assert_eq!(s.transcript(), reveals.as_slice());
    }

    #[test]
    fn flat_conversation_completes_on_presentation() {
        let case = case();
        let mut s = Session::new();
        let view = start_conversation(&case, &mut s, "bates", "where").unwrap();

        assert!(view.is_terminal());
        assert!(s.active_conversation().is_none());
        assert_eq!(s.questions_asked(), 1);
        assert!(s.character_progress("bates").unwrap().is_completed("where"));
    }

    #[test]
    fn jumps_go_anywhere_and_respond_completes() {
        let case = case();
        let mut s = Session::new();
        start_conversation(&case, &mut s, "bates", "keys").unwrap();

        let forward = choose_follow_up(&case, &mut s, "bates", "keys", 0, 0).unwrap();
        assert!(matches!(&forward, Resolution::Step(v) if v.step_index == 1));

        let back = choose_follow_up(&case, &mut s, "bates", "keys", 1, 0).unwrap();
        assert!(matches!(&back, Resolution::Step(v) if v.step_index == 0 && v.entry.is_none()));
        assert_eq!(s.ledger().len(), 1);

        choose_follow_up(&case, &mut s, "bates", "keys", 0, 0).unwrap();
        let end = choose_follow_up(&case, &mut s, "bates", "keys", 1, 1).unwrap();
        assert!(end.is_terminal());
        assert_eq!(s.ledger().len(), 2);
        assert_eq!(s.questions_asked(), 1);
        assert!(s.character_progress("bates").unwrap().has_chosen("keys", 1, 1));

        let options = list_available_conversations(&case, &s, "bates").unwrap();
        assert!(options[0].explored);
        assert!(!options[1].explored);
    }

    #[test]
    fn replay_does_not_count_twice() {
        let case = case();
        let mut s = Session::new();
        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        choose_follow_up(&case, &mut s, "bates", "keys", 0, 1).unwrap();
        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        choose_follow_up(&case, &mut s, "bates", "keys", 0, 1).unwrap();

        assert_eq!(s.questions_asked(), 1);
        assert_eq!(s.character_progress("bates").unwrap().questions_asked(), 1);
        assert_eq!(s.ledger().len(), 1);
    }

    #[test]
    fn choices_need_the_open_step() {
        let case = case();
        let mut s = Session::new();
        assert!(matches!(
            choose_follow_up(&case, &mut s, "bates", "keys", 0, 1),
            Err(GameError::ConversationNotActive { step: 0, .. })
        ));
        assert!(s.character_progress("bates").is_none());
        assert!(s.ledger().is_empty());

        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        // step 1 has not been shown yet
        assert!(matches!(
            choose_follow_up(&case, &mut s, "bates", "keys", 1, 1),
            Err(GameError::ConversationNotActive { step: 1, .. })
        ));
        assert!(!s.ledger().contains("另一把钥匙"));

        choose_follow_up(&case, &mut s, "bates", "keys", 0, 1).unwrap();
        // finished, so nothing is waiting any more
        assert!(choose_follow_up(&case, &mut s, "bates", "keys", 0, 1).is_err());
        assert_eq!(s.questions_asked(), 1);
    }

    #[test]
    fn choices_must_match_the_open_conversation() {
        let case = case();
        let mut s = Session::new();
        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        assert!(choose_follow_up(&case, &mut s, "harris", "h1", 0, 0).is_err());
        assert_eq!(s.active_conversation().unwrap().conversation_id, "keys");
    }

    #[test]
    fn flat_questions_with_one_character_share_a_transcript() {
        let case = case();
        let mut s = Session::new();
        start_conversation(&case, &mut s, "harris", "h1").unwrap();
        assert_eq!(s.transcript().len(), 2);
        start_conversation(&case, &mut s, "bates", "where").unwrap();
        assert_eq!(s.transcript().len(), 2);
        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        assert_eq!(s.transcript().len(), 6);
        assert_eq!(s.transcript_character(), Some("bates"));
    }

    #[test]
    fn leaving_the_dialog_screen_starts_a_new_transcript() {
        let case = case();
        let mut s = Session::new();
        start_conversation(&case, &mut s, "bates", "where").unwrap();
        s.navigate(Screen::Game);
        start_conversation(&case, &mut s, "bates", "where").unwrap();
        assert_eq!(s.transcript().len(), 2);
    }

    #[test]
    fn switching_character_clears_transcript() {
        let case = case();
        let mut s = Session::new();
        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        choose_follow_up(&case, &mut s, "bates", "keys", 0, 0).unwrap();
        let before = s.transcript().len();

        start_conversation(&case, &mut s, "bates", "where").unwrap();
        assert!(s.transcript().len() > before);

        start_conversation(&case, &mut s, "harris", "h1").unwrap();
        assert_eq!(s.transcript().len(), 2);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let case = case();
        let mut s = Session::new();
        assert!(start_conversation(&case, &mut s, "nobody", "keys").is_err());
        assert!(start_conversation(&case, &mut s, "bates", "nothing").is_err());
        assert!(matches!(
            choose_follow_up(&case, &mut s, "bates", "keys", 5, 0),
            Err(GameError::StepNotFound { step: 5, .. })
        ));
        assert!(matches!(
            choose_follow_up(&case, &mut s, "bates", "keys", 0, 7),
            Err(GameError::FollowUpNotFound { follow_up: 7, .. })
        ));
        assert!(s.character_progress("bates").is_none());
    }

    #[test]
    fn current_step_tracks_pointer() {
        let case = case();
        let mut s = Session::new();
        assert!(current_step(&case, &s).is_none());
        start_conversation(&case, &mut s, "bates", "keys").unwrap();
        choose_follow_up(&case, &mut s, "bates", "keys", 0, 0).unwrap();
        assert_eq!(current_step(&case, &s).unwrap().step_index, 1);
    }
}
