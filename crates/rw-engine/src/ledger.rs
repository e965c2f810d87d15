//! The clue ledger: collected clues, deduplicated by title.
//!
//! Besides storage, this module derives the two read-only views the clue
//! screen needs: a categorized grouping ([`categorize`]) and summary
//! statistics with a readiness suggestion ([`analyze`]).

use std::collections::BTreeMap;
use std::fmt;

use rw_core::Clue;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deduplicated clues in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueLedger {
    clues: Vec<Clue>,
}

impl ClueLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a clue. Returns false, and keeps the earlier entry, if a clue
    /// with the same title is already present.
    pub fn add(&mut self, clue: Clue) -> bool {
        if self.contains(&clue.title) {
            debug!(title = %clue.title, "duplicate clue dropped");
            return false;
        }
        debug!(title = %clue.title, source = %clue.source, "clue recorded");
        self.clues.push(clue);
        true
    }

    /// Whether a clue with this title has been recorded.
    pub fn contains(&self, title: &str) -> bool {
        self.clues.iter().any(|c| c.title == title)
    }

    /// All clues in insertion order.
    pub fn all(&self) -> &[Clue] {
        &self.clues
    }

    /// Number of clues.
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    /// Group the recorded clues by category.
    pub fn categorized(&self) -> BTreeMap<Category, Vec<Clue>> {
        categorize(&self.clues)
    }

    /// Summarize the recorded clues.
    pub fn analyze(&self, threshold: usize) -> Statistics {
        analyze(&self.clues, threshold)
    }
}

/// Placeholder the clue screen shows while the ledger is empty.
pub const EMPTY_LEDGER_TEXT: &str = "还没有收集到任何线索";

/// Clue categories, ordered as the clue screen lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Physical evidence from the scene.
    Evidence,
    /// Statements made in conversation.
    Testimony,
    /// Whereabouts and observed behavior.
    Behavior,
    /// Reasons someone might have done it.
    Motive,
    /// Times and schedules.
    Timeline,
    /// Everything else.
    Other,
}

/// Title keywords per category, in matching priority.
const TITLE_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Evidence, &["证据", "凶器", "现场", "指纹"]),
    (Category::Behavior, &["行踪", "行为", "观察"]),
    (Category::Motive, &["动机", "遗产", "经济", "矛盾", "冲突"]),
    (Category::Timeline, &["时间", "日程"]),
];

/// Marker in a clue's source that means it was said in conversation.
const CONVERSATION_MARKER: &str = "对话";

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 6] = [
        Category::Evidence,
        Category::Testimony,
        Category::Behavior,
        Category::Motive,
        Category::Timeline,
        Category::Other,
    ];

    /// Classify a single clue.
    ///
    /// Title keywords decide first, in the order evidence, behavior, motive,
    /// timeline. Failing that, a conversation source means testimony.
    pub fn classify(clue: &Clue) -> Category {
        TITLE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| clue.title.contains(k)))
            .map(|(category, _)| *category)
            .unwrap_or_else(|| {
                if clue.source.contains(CONVERSATION_MARKER) {
                    Category::Testimony
                } else {
                    Category::Other
                }
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Evidence => "物证",
            Self::Testimony => "证词",
            Self::Behavior => "行为",
            Self::Motive => "动机",
            Self::Timeline => "时间线",
            Self::Other => "其他",
        };
        f.write_str(label)
    }
}

/// Group clues by category. Every category is present, possibly empty, and
/// clues keep their relative order within a category.
pub fn categorize(clues: &[Clue]) -> BTreeMap<Category, Vec<Clue>> {
    let mut groups: BTreeMap<Category, Vec<Clue>> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
    for clue in clues {
        groups
            .entry(Category::classify(clue))
            .or_default()
            .push(clue.clone());
    }
    groups
}

/// Summary of a set of clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// All clues.
    pub total: usize,
    /// Clues tagged misleading.
    pub misleading: usize,
    /// `total - misleading`.
    pub valid: usize,
    /// Clues per character, keyed by the name in the clue's source.
    pub by_character: BTreeMap<String, usize>,
    /// Whether the valid clues are enough to accuse someone.
    pub readiness: Readiness,
}

/// Compute statistics over `clues`, judging readiness against `threshold`
/// valid clues.
pub fn analyze(clues: &[Clue], threshold: usize) -> Statistics {
    let total = clues.len();
    let misleading = clues.iter().filter(|c| c.is_misleading()).count();
    let valid = total - misleading;

    let mut by_character = BTreeMap::new();
    for name in clues.iter().filter_map(|c| speaker_from_source(&c.source)) {
        *by_character.entry(name.to_string()).or_insert(0) += 1;
    }

    Statistics {
        total,
        misleading,
        valid,
        by_character,
        readiness: Readiness::assess(valid, threshold),
    }
}

/// Extract `<name>` from a source of the form `与<name>的对话`.
pub fn speaker_from_source(source: &str) -> Option<&str> {
    source
        .strip_prefix('与')
        .and_then(|rest| rest.strip_suffix("的对话"))
        .filter(|name| !name.is_empty())
}

/// Suggestion on whether to keep investigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Readiness {
    /// Enough clues to make a deduction.
    Ready,
    /// Not yet.
    KeepSearching {
        /// Clues counted so far.
        have: usize,
        /// Clues required.
        need: usize,
    },
}

impl Readiness {
    /// Compare a clue count against a threshold.
    pub fn assess(have: usize, need: usize) -> Self {
        if have >= need {
            Self::Ready
        } else {
            Self::KeepSearching { have, need }
        }
    }

    /// Whether this is [`Readiness::Ready`].
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => f.write_str("你已经收集了足够的线索，可以开始推理了！"),
            Self::KeepSearching { have, need } => {
                write!(f, "还需要收集更多线索 ({have}/{need})")
            }
        }
    }
}
