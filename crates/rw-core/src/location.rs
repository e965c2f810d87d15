//! Searchable locations and the evidence hidden in them.

use serde::{Deserialize, Serialize};

use crate::clue::Clue;

/// A place the player can search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Stable identifier, e.g. `library`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Icon reference. Opaque to the engine.
    #[serde(default)]
    pub icon: String,
    /// Evidence items in authoring order; indices are their identity.
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

impl Location {
    /// Create an empty location.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            icon: String::new(),
            evidence: Vec::new(),
        }
    }

    /// Add an evidence item.
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }
}

/// A discoverable item at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// Item name.
    pub name: String,
    /// Hint shown before the item is found.
    #[serde(default)]
    pub hint: String,
    /// Icon reference.
    #[serde(default)]
    pub icon: String,
    /// Where the item is drawn. The engine ignores it.
    #[serde(default)]
    pub position: Position,
    /// Clue yielded when found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<Clue>,
}

impl Evidence {
    /// Create an evidence item with no clue.
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
            icon: String::new(),
            position: Position::default(),
            clue: None,
        }
    }

    /// Attach the clue this item yields.
    pub fn with_clue(mut self, clue: Clue) -> Self {
        self.clue = Some(clue);
        self
    }
}

/// Display position as percentages of the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}
