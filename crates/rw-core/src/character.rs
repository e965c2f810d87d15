//! Characters and their conversation trees.
//!
//! Every conversation is a list of [`Step`]s connected by [`FollowUp`]
//! edges. A flat question-and-answer exchange is simply a conversation with
//! one step and no follow-ups; legacy content written as a `questions` list is
//! normalized into that shape when a character is deserialized.

use serde::{Deserialize, Serialize};

use crate::clue::Clue;

/// A person the player can interrogate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CharacterRecord")]
pub struct Character {
    /// Stable identifier, e.g. `bates`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short role description, e.g. `管家，60岁`.
    pub role: String,
    /// Portrait asset reference. Opaque to the engine.
    pub portrait: String,
    /// Conversations in authoring order.
    pub conversations: Vec<Conversation>,
}

impl Character {
    /// Create a character with no conversations.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            portrait: String::new(),
            conversations: Vec::new(),
        }
    }

    /// Add a conversation.
    pub fn with_conversation(mut self, conversation: Conversation) -> Self {
        self.conversations.push(conversation);
        self
    }

    /// Look up one of this character's conversations.
    pub fn conversation(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }
}

/// A branching dialogue unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Identifier, unique within the owning character.
    pub id: String,
    /// Label shown on the option button.
    pub label: String,
    /// Text shown when the conversation opens.
    #[serde(default)]
    pub entry: String,
    /// Steps; index 0 is the entry point.
    pub steps: Vec<Step>,
}

impl Conversation {
    /// Create a conversation with no steps yet.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            entry: String::new(),
            steps: Vec::new(),
        }
    }

    /// A single question with a single answer and no follow-ups.
    pub fn flat(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        clue: Option<Clue>,
    ) -> Self {
        let question = question.into();
        let mut step = Step::new(answer).with_question(question.clone());
        step.clue = clue;
        Self::new(id, question).with_step(step)
    }

    /// Set the entry text.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Append a step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Get a step by index.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Whether this conversation has the flat shape: one step, no branches.
    pub fn is_flat(&self) -> bool {
        self.steps.len() == 1 && self.steps[0].is_terminal()
    }
}

/// One exchange within a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// What the player asks, if anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// What the character answers.
    pub answer: String,
    /// Clue revealed after the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<Clue>,
    /// Choices offered after this step. Empty means the conversation ends here.
    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,
}

impl Step {
    /// Create a step with just an answer.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            question: None,
            answer: answer.into(),
            clue: None,
            follow_ups: Vec::new(),
        }
    }

    /// Set the question.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Set the clue.
    pub fn with_clue(mut self, clue: Clue) -> Self {
        self.clue = Some(clue);
        self
    }

    /// Add a follow-up choice.
    pub fn with_follow_up(mut self, follow_up: FollowUp) -> Self {
        self.follow_ups.push(follow_up);
        self
    }

    /// A step without follow-ups ends its conversation.
    pub fn is_terminal(&self) -> bool {
        self.follow_ups.is_empty()
    }
}

/// A player-chosen branch out of a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUp {
    /// Choice text.
    pub text: String,
    /// What happens when it is chosen.
    #[serde(flatten)]
    pub outcome: FollowUpOutcome,
}

impl FollowUp {
    /// A follow-up that moves to another step of the same conversation.
    pub fn jump(text: impl Into<String>, next_step: usize) -> Self {
        Self {
            text: text.into(),
            outcome: FollowUpOutcome::Jump { next_step },
        }
    }

    /// A follow-up that ends the conversation with an inline response.
    pub fn respond(text: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: FollowUpOutcome::Respond {
                response: response.into(),
                clue: None,
            },
        }
    }

    /// Like [`FollowUp::respond`], also yielding a clue.
    pub fn respond_with_clue(
        text: impl Into<String>,
        response: impl Into<String>,
        clue: Clue,
    ) -> Self {
        Self {
            text: text.into(),
            outcome: FollowUpOutcome::Respond {
                response: response.into(),
                clue: Some(clue),
            },
        }
    }
}

/// The two things a follow-up can do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FollowUpOutcome {
    /// Continue at another step of the same conversation.
    Jump {
        /// Index into the conversation's steps.
        next_step: usize,
    },
    /// End the conversation.
    Respond {
        /// The character's closing reply.
        response: String,
        /// Clue revealed after the reply.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clue: Option<Clue>,
    },
}

/// Legacy flat question entry.
#[derive(Debug, Clone, Deserialize)]
struct Question {
    id: String,
    text: String,
    answer: String,
    #[serde(default)]
    clue: Option<Clue>,
}

impl From<Question> for Conversation {
    fn from(q: Question) -> Self {
        Conversation::flat(q.id, q.text, q.answer, q.clue)
    }
}

/// On-disk shape of a character, accepting either content variant.
#[derive(Debug, Deserialize)]
struct CharacterRecord {
    id: String,
    name: String,
    role: String,
    #[serde(default)]
    portrait: String,
    #[serde(default)]
    conversations: Vec<Conversation>,
    #[serde(default)]
    questions: Vec<Question>,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        let mut conversations = record.conversations;
        conversations.extend(record.questions.into_iter().map(Conversation::from));
        Self {
            id: record.id,
            name: record.name,
            role: record.role,
            portrait: record.portrait,
            conversations,
        }
    }
}
