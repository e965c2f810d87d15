//! The case file: everything a playthrough reads but never writes.

use serde::{Deserialize, Serialize};

use crate::character::{Character, Conversation};
use crate::error::{ContentError, ContentResult};
use crate::location::Location;
use crate::validate::{ValidationIssue, validate_case};

const RAVENSWOOD_JSON: &str = include_str!("../data/ravenswood.json");

/// Static, read-only content for one mystery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    /// Case title.
    pub title: String,
    /// Everyone who can be questioned, in display order.
    pub characters: Vec<Character>,
    /// Everywhere that can be searched, in display order.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Who did it, and how the ending reads.
    pub solution: Solution,
}

/// The fixed answer to the mystery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Character ID of the culprit.
    pub culprit: String,
    /// Explanation shown after a correct accusation.
    #[serde(default)]
    pub truth: String,
    /// Explanation shown after a wrong accusation.
    #[serde(default)]
    pub reveal: String,
    /// Closing line after a correct accusation.
    #[serde(default)]
    pub epilogue_correct: String,
    /// Closing line after a wrong accusation.
    #[serde(default)]
    pub epilogue_incorrect: String,
}

impl Solution {
    /// A solution naming only the culprit.
    pub fn new(culprit: impl Into<String>) -> Self {
        Self {
            culprit: culprit.into(),
            truth: String::new(),
            reveal: String::new(),
            epilogue_correct: String::new(),
            epilogue_incorrect: String::new(),
        }
    }
}

impl CaseFile {
    /// Parse and validate a JSON case file.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let case: CaseFile = serde_json::from_str(json)?;
        case.into_validated()
    }

    /// The bundled Ravenswood manor case.
    pub fn ravenswood() -> ContentResult<Self> {
        Self::from_json(RAVENSWOOD_JSON)
    }

    /// Reject the case if validation reports any error.
    pub fn into_validated(self) -> ContentResult<Self> {
        let errors: Vec<ValidationIssue> =
            self.validate().into_iter().filter(|i| i.is_error).collect();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ContentError::Invalid(errors))
        }
    }

    /// Run validation and return every issue, warnings included.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_case(self)
    }

    /// Look up a character.
    pub fn character(&self, id: &str) -> ContentResult<&Character> {
        self.characters
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ContentError::CharacterNotFound(id.to_string()))
    }

    /// Look up a location.
    pub fn location(&self, id: &str) -> ContentResult<&Location> {
        self.locations
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| ContentError::LocationNotFound(id.to_string()))
    }

    /// Look up a conversation belonging to a character.
    pub fn conversation(
        &self,
        character_id: &str,
        conversation_id: &str,
    ) -> ContentResult<&Conversation> {
        self.character(character_id)?
            .conversation(conversation_id)
            .ok_or_else(|| ContentError::ConversationNotFound {
                character: character_id.to_string(),
                conversation: conversation_id.to_string(),
            })
    }

    /// Character IDs in display order.
    pub fn character_ids(&self) -> Vec<&str> {
        self.characters.iter().map(|c| c.id.as_str()).collect()
    }

    /// Location IDs in display order.
    pub fn location_ids(&self) -> Vec<&str> {
        self.locations.iter().map(|l| l.id.as_str()).collect()
    }

    /// Whether a character with this ID exists.
    pub fn has_character(&self, id: &str) -> bool {
        self.characters.iter().any(|c| c.id == id)
    }

    /// Character ID of the culprit.
    pub fn culprit(&self) -> &str {
        &self.solution.culprit
    }

    /// The fixed answer and its ending texts.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }
}
