use crate::validate::ValidationIssue;

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised while loading or querying a case file.
///
/// Content is static and trusted, so a lookup miss is an authoring bug in
/// the caller or the data, never an expected runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// No character has the requested ID.
    #[error("character not found: {0}")]
    CharacterNotFound(String),

    /// No location has the requested ID.
    #[error("location not found: {0}")]
    LocationNotFound(String),

    /// The character exists but has no conversation with this ID.
    #[error("conversation not found: {character}/{conversation}")]
    ConversationNotFound {
        /// The owning character.
        character: String,
        /// The missing conversation.
        conversation: String,
    },

    /// The payload is not valid JSON for a case file.
    #[error("failed to parse case file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The case file parsed but failed validation.
    #[error("case file has {} error(s): {}", .0.len(), join_issues(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
