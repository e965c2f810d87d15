//! Structural validation of case files.
//!
//! Checks that identifiers are unique, that every conversation has an entry
//! step, that jump targets stay inside their conversation, and that the
//! culprit is one of the characters.

use std::collections::HashSet;
use std::fmt;

use crate::case::CaseFile;
use crate::character::{Character, FollowUpOutcome};

/// A warning or error found during case file validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// What the issue is attached to, e.g. `character 'bates'`.
    pub subject: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Validate a case file. Returns every issue found, errors and warnings.
pub fn validate_case(case: &CaseFile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut character_ids = HashSet::new();
    for character in &case.characters {
        if !character_ids.insert(character.id.as_str()) {
            issues.push(ValidationIssue::error(
                format!("character '{}'", character.id),
                "duplicate character id",
            ));
        }
        validate_character(character, &mut issues);
    }

    let mut location_ids = HashSet::new();
    for location in &case.locations {
        let subject = format!("location '{}'", location.id);
        if !location_ids.insert(location.id.as_str()) {
            issues.push(ValidationIssue::error(&subject, "duplicate location id"));
        }
        if location.evidence.is_empty() {
            issues.push(ValidationIssue::warning(subject, "no evidence to find"));
        }
    }

    if !character_ids.contains(case.solution.culprit.as_str()) {
        issues.push(ValidationIssue::error(
            "solution",
            format!("culprit '{}' is not a character", case.solution.culprit),
        ));
    }

    issues
}

fn validate_character(character: &Character, issues: &mut Vec<ValidationIssue>) {
    if character.conversations.is_empty() {
        issues.push(ValidationIssue::warning(
            format!("character '{}'", character.id),
            "no conversations",
        ));
    }

    let mut seen = HashSet::new();
    for conversation in &character.conversations {
        let subject = format!("conversation '{}/{}'", character.id, conversation.id);

        if !seen.insert(conversation.id.as_str()) {
            issues.push(ValidationIssue::error(&subject, "duplicate conversation id"));
        }
        if conversation.steps.is_empty() {
            issues.push(ValidationIssue::error(&subject, "has no steps"));
            continue;
        }

        let step_count = conversation.steps.len();
        for (index, step) in conversation.steps.iter().enumerate() {
            let broken_jumps = step
                .follow_ups
                .iter()
                .filter_map(|f| match f.outcome {
                    FollowUpOutcome::Jump { next_step } => Some((f, next_step)),
                    FollowUpOutcome::Respond { .. } => None,
                })
                .filter(|(_, next_step)| *next_step >= step_count);

            for (follow_up, next_step) in broken_jumps {
                issues.push(ValidationIssue::error(
                    &subject,
                    format!(
                        "step {index} follow-up '{}' jumps to step {next_step}, \
                         but only {step_count} step(s) exist",
                        follow_up.text
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::Solution;
    use crate::character::{Conversation, FollowUp, Step};
    use crate::location::Location;

    fn case_with(characters: Vec<Character>, culprit: &str) -> CaseFile {
        CaseFile {
            title: "Test".to_string(),
            characters,
            locations: vec![],
            solution: Solution::new(culprit),
        }
    }

    #[test]
    fn valid_case_has_no_errors() {
        let ch = Character::new("bates", "Bates", "butler")
            .with_conversation(Conversation::flat("q1", "Q", "A", None));
        let issues = validate_case(&case_with(vec![ch], "bates"));
        assert!(issues.iter().all(|i| !i.is_error));
    }

    #[test]
    fn empty_conversation_is_error() {
        let ch = Character::new("bates", "Bates", "butler")
            .with_conversation(Conversation::new("q1", "Q"));
        let issues = validate_case(&case_with(vec![ch], "bates"));
        assert!(issues.iter().any(|i| i.is_error && i.message == "has no steps"));
    }

    #[test]
    fn jump_out_of_range_is_error() {
        let conv = Conversation::new("q1", "Q")
            .with_step(Step::new("A").with_follow_up(FollowUp::jump("more", 3)));
        let ch = Character::new("bates", "Bates", "butler").with_conversation(conv);
        let issues = validate_case(&case_with(vec![ch], "bates"));
        assert!(issues.iter().any(|i| i.is_error && i.message.contains("jumps to step 3")));
    }

    #[test]
    fn unknown_culprit_is_error() {
        let issues = validate_case(&case_with(vec![], "nobody"));
        assert!(issues.iter().any(|i| i.is_error && i.subject == "solution"));
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let a = Character::new("x", "X", "r");
        let b = Character::new("x", "X2", "r");
        let mut case = case_with(vec![a, b], "x");
        case.locations = vec![Location::new("hall", "Hall"), Location::new("hall", "Hall")];

        let issues = validate_case(&case);
        assert!(issues.iter().any(|i| i.message == "duplicate character id"));
        assert!(issues.iter().any(|i| i.message == "duplicate location id"));
    }

    #[test]
    fn display_format() {
        let issue = ValidationIssue::warning("location 'hall'", "no evidence to find");
        assert_eq!(issue.to_string(), "warning: location 'hall': no evidence to find");
    }
}
