//! Chronological record of what the player did during a playthrough.
//!
//! Engines push a [`JournalEntry`] whenever something first happens; the
//! journal stamps it with the wall-clock time. Repeats (a replayed
//! conversation, a second search of the same item) are not journaled.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something worth remembering about the investigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum JournalEntry {
    /// A conversation reached an end for the first time.
    ConversationCompleted {
        /// Character's display name.
        character: String,
        /// Conversation label.
        label: String,
    },
    /// A new clue entered the ledger.
    ClueRecorded {
        /// Clue title.
        title: String,
        /// Clue source.
        source: String,
    },
    /// An evidence item was found for the first time.
    EvidenceFound {
        /// Location name.
        location: String,
        /// Evidence name.
        evidence: String,
    },
    /// The player picked (or changed) their suspect.
    SuspectSelected {
        /// Suspect's display name.
        suspect: String,
    },
    /// The player made their accusation.
    DeductionSubmitted {
        /// Suspect's display name.
        suspect: String,
        /// Whether the accusation was right.
        correct: bool,
    },
}

impl fmt::Display for JournalEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConversationCompleted { character, label } => {
                write!(f, "**Questioned** {character}: {label}")
            }
            Self::ClueRecorded { title, source } => write!(f, "**Clue** {title} *({source})*"),
            Self::EvidenceFound { location, evidence } => {
                write!(f, "**Found** {evidence} in {location}")
            }
            Self::SuspectSelected { suspect } => write!(f, "**Suspect** {suspect}"),
            Self::DeductionSubmitted { suspect, correct } => {
                let outcome = if *correct { "correct" } else { "wrong" };
                write!(f, "**Accused** {suspect} ({outcome})")
            }
        }
    }
}

/// A journal entry with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// When it happened.
    pub at: DateTime<Utc>,
    /// What happened.
    pub entry: JournalEntry,
}

/// The investigation journal, oldest record first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    records: Vec<JournalRecord>,
}

impl Journal {
    /// Stamp an entry with the current time and append it.
    pub fn record(&mut self, entry: JournalEntry) {
        self.records.push(JournalRecord {
            at: Utc::now(),
            entry,
        });
    }

    /// Every record in order.
    pub fn records(&self) -> &[JournalRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&JournalEntry> {
        self.records.last().map(|r| &r.entry)
    }

    /// Render as a markdown list under a heading.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Investigation Journal\n\n");
        for record in &self.records {
            out.push_str(&format!("- `{}` {}\n", record.at.format("%H:%M:%S"), record.entry));
        }
        out
    }
}
