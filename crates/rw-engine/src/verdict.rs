//! Progress gating and the final accusation.

use rw_core::CaseFile;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::journal::JournalEntry;
use crate::ledger::Readiness;
use crate::session::{Screen, Session};

/// Outcome of an accusation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Whether the accused is the culprit.
    pub is_correct: bool,
    /// Character ID of the accused.
    pub selected_suspect: String,
    /// Display name of the accused.
    pub suspect_name: String,
    /// Character ID of the actual culprit.
    pub culprit: String,
    /// Result screen text.
    pub narrative: String,
    /// The reasoning that accompanied the accusation, trimmed.
    pub reasoning: String,
}

/// Whether enough clues have been collected to open the deduction screen.
pub fn deduction_unlocked(config: &GameConfig, session: &Session) -> bool {
    session.ledger.len() >= config.clue_threshold
}

/// Whether an accusation could be submitted right now.
pub fn deduction_ready(config: &GameConfig, session: &Session) -> bool {
    deduction_unlocked(config, session)
        && session.selected_suspect.is_some()
        && config.reasoning.accepts(&session.reasoning)
}

/// Readiness message for the collected clue count.
pub fn deduction_hint(config: &GameConfig, session: &Session) -> String {
    Readiness::assess(session.ledger.len(), config.clue_threshold).to_string()
}

/// Choose who to accuse. The last choice wins.
pub fn select_suspect(
    case: &CaseFile,
    session: &mut Session,
    character_id: &str,
) -> GameResult<()> {
    session.ensure_open()?;
    let character = case.character(character_id)?;
    session.selected_suspect = Some(character.id.clone());
    session.journal.record(JournalEntry::SuspectSelected {
        suspect: character.name.clone(),
    });
    info!(session = %session.id, suspect = character_id, "suspect selected");
    Ok(())
}

/// Replace the written reasoning.
pub fn set_reasoning(session: &mut Session, text: &str) -> GameResult<()> {
    session.ensure_open()?;
    session.reasoning = text.to_string();
    Ok(())
}

/// Make the accusation and close the case.
///
/// `reasoning`, when given, replaces whatever was set before. Correctness
/// depends on the suspect alone; the clue count plays no part.
pub fn submit_deduction(
    case: &CaseFile,
    config: &GameConfig,
    session: &mut Session,
    reasoning: Option<&str>,
) -> GameResult<Verdict> {
    session.ensure_open()?;
    if let Some(text) = reasoning {
        session.reasoning = text.to_string();
    }
    let suspect_id = session
        .selected_suspect
        .clone()
        .ok_or(GameError::NoSuspectSelected)?;

    let reasoning = session.reasoning.trim().to_string();
    if !config.reasoning.accepts(&reasoning) {
        let chars = reasoning.chars().count();
        let min = config.reasoning.min_chars();
        warn!(chars, min, "reasoning rejected");
        return Err(GameError::ReasoningTooShort { chars, min });
    }

    let suspect = case.character(&suspect_id)?;
    let is_correct = suspect_id == case.culprit();
    let narrative = narrate(case, &suspect.name, is_correct, &reasoning);

    session.completed = true;
    session.screen = Screen::Result;
    session.journal.record(JournalEntry::DeductionSubmitted {
        suspect: suspect.name.clone(),
        correct: is_correct,
    });
    info!(
        session = %session.id,
        suspect = %suspect_id,
        correct = is_correct,
        clues = session.ledger.len(),
        "verdict delivered"
    );

    Ok(Verdict {
        is_correct,
        selected_suspect: suspect_id,
        suspect_name: suspect.name.clone(),
        culprit: case.culprit().to_string(),
        narrative,
        reasoning,
    })
}

fn narrate(case: &CaseFile, suspect_name: &str, is_correct: bool, reasoning: &str) -> String {
    let solution = case.solution();
    let mut sections = if is_correct {
        vec![
            format!("推理正确！你成功找出了真正的凶手：{suspect_name}"),
            format!("案件真相：\n{}", solution.truth),
        ]
    } else {
        vec![
            format!("推理错误。你选择的嫌疑人是：{suspect_name}"),
            format!("正确答案：\n{}", solution.reveal),
        ]
    };
    if !reasoning.is_empty() {
        sections.push(format!("你的推理：\n{reasoning}"));
    }
    let epilogue = if is_correct {
        &solution.epilogue_correct
    } else {
        &solution.epilogue_incorrect
    };
    if !epilogue.is_empty() {
        sections.push(epilogue.clone());
    }
    sections.join("\n\n")
}
