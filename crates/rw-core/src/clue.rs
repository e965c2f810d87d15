//! Clues: the facts a player collects during an investigation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A titled, sourced fact. The title doubles as the identity of the clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    /// Short title, unique within a playthrough's ledger.
    pub title: String,
    /// The fact itself.
    pub content: String,
    /// Where it came from, e.g. `与贝茨的对话` or a location name.
    pub source: String,
    /// Optional classification tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<ClueTag>,
}

impl Clue {
    /// Create an untagged clue.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            source: source.into(),
            tag: None,
        }
    }

    /// Mark this clue as a red herring.
    pub fn misleading(mut self) -> Self {
        self.tag = Some(ClueTag::Misleading);
        self
    }

    /// Whether this clue is tagged as misleading.
    pub fn is_misleading(&self) -> bool {
        self.tag == Some(ClueTag::Misleading)
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.source)
    }
}

/// Classification tags a clue may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClueTag {
    /// Planted to mislead; does not count towards valid clues.
    Misleading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_tag() {
        let clue = Clue::new("泥泞的脚印", "花园里有一串脚印。", "花园").misleading();
        assert!(clue.is_misleading());
        assert_eq!(clue.to_string(), "泥泞的脚印 (花园)");
    }

    #[test]
    fn deserializes_type_field() {
        let json = r#"{"title":"a","content":"b","source":"c","type":"misleading"}"#;
        let clue: Clue = serde_json::from_str(json).unwrap();
        assert_eq!(clue.tag, Some(ClueTag::Misleading));

        let json = r#"{"title":"a","content":"b","source":"c"}"#;
        let clue: Clue = serde_json::from_str(json).unwrap();
        assert!(!clue.is_misleading());
    }
}
