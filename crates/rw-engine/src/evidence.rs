//! Evidence engine: searching locations.
//!
//! Finding an item is idempotent. The first find marks it, logs a search
//! record, and forwards its clue to the ledger; later finds of the same
//! item only return the same result.

use rw_core::{CaseFile, Clue, Evidence};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::journal::JournalEntry;
use crate::session::{SearchRecord, Session};

/// An evidence item with its found marker.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceStatus<'c> {
    /// Index within the location.
    pub index: usize,
    /// The item.
    pub evidence: &'c Evidence,
    /// Whether it has been found.
    pub found: bool,
}

/// What finding an item reveals. Derived from content only, so repeated
/// finds yield equal results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindResult {
    /// Location searched.
    pub location_id: String,
    /// Index of the item.
    pub evidence_index: usize,
    /// Item name.
    pub evidence_name: String,
    /// The item's hint text.
    pub hint: String,
    /// Clue the item yields.
    pub clue: Option<Clue>,
}

/// Found and total item counts for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchProgress {
    /// Items found.
    pub found: usize,
    /// Items present.
    pub total: usize,
}

impl SearchProgress {
    /// Whether every item has been found.
    pub fn is_complete(&self) -> bool {
        self.found >= self.total
    }
}

/// A location's items, in authoring order, with found markers.
pub fn list_evidence<'c>(
    case: &'c CaseFile,
    session: &Session,
    location_id: &str,
) -> GameResult<Vec<EvidenceStatus<'c>>> {
    let location = case.location(location_id)?;
    Ok(location
        .evidence
        .iter()
        .enumerate()
        .map(|(index, evidence)| EvidenceStatus {
            index,
            evidence,
            found: session.is_found(location_id, index),
        })
        .collect())
}

/// Search for item `evidence_index` at a location.
pub fn find_evidence(
    case: &CaseFile,
    session: &mut Session,
    location_id: &str,
    evidence_index: usize,
) -> GameResult<FindResult> {
    session.ensure_open()?;
    let location = case.location(location_id)?;
    let evidence =
        location
            .evidence
            .get(evidence_index)
            .ok_or_else(|| GameError::EvidenceNotFound {
                location: location_id.to_string(),
                index: evidence_index,
            })?;

    let result = FindResult {
        location_id: location.id.clone(),
        evidence_index,
        evidence_name: evidence.name.clone(),
        hint: evidence.hint.clone(),
        clue: evidence.clue.clone(),
    };

    let newly = session
        .found
        .entry(location.id.clone())
        .or_default()
        .insert(evidence_index);
    if !newly {
        debug!(location = location_id, index = evidence_index, "evidence already found");
        return Ok(result);
    }

    session.searches.push(SearchRecord {
        location_id: location.id.clone(),
        evidence_index,
        evidence_name: evidence.name.clone(),
    });
    session.journal.record(JournalEntry::EvidenceFound {
        location: location.name.clone(),
        evidence: evidence.name.clone(),
    });
    if let Some(clue) = &evidence.clue {
        session.record_clue(clue.clone());
    }
    info!(
        session = %session.id,
        location = location_id,
        evidence = %evidence.name,
        yields_clue = evidence.clue.is_some(),
        "evidence found"
    );
    Ok(result)
}

/// Whether every item at a location has been found. A location with no
/// items counts as fully searched.
pub fn is_location_fully_searched(
    case: &CaseFile,
    session: &Session,
    location_id: &str,
) -> GameResult<bool> {
    search_progress(case, session, location_id).map(|p| p.is_complete())
}

/// Found and total counts at a location.
pub fn search_progress(
    case: &CaseFile,
    session: &Session,
    location_id: &str,
) -> GameResult<SearchProgress> {
    let location = case.location(location_id)?;
    Ok(SearchProgress {
        found: session.found_at(location_id).len(),
        total: location.evidence.len(),
    })
}
