// ABOUTME: Name validation shared by toppings and pizzas
// ABOUTME: Blank, character, and length checks plus the user-facing rejection messages

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::constants::MAX_NAME_LENGTH;

/// The catalog entity a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Topping,
    Pizza,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Topping => "topping",
            EntityKind::Pizza => "pizza",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the rejected submission was trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Create,
    Rename,
}

impl Outcome {
    /// Trailing sentence telling the user nothing was changed
    pub fn suffix(&self, kind: EntityKind) -> String {
        match self {
            Outcome::Create => format!("No {} created.", kind),
            Outcome::Rename => "Name unchanged.".to_string(),
        }
    }
}

/// Reasons a submitted name is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameRejection {
    #[error("name is blank")]
    Blank,

    #[error("name contains special characters")]
    SpecialCharacters,

    #[error("name is longer than {MAX_NAME_LENGTH} characters")]
    TooLong,

    #[error("name already exists")]
    Duplicate,
}

impl NameRejection {
    /// Full message shown on the form that was rejected
    pub fn message(&self, kind: EntityKind, outcome: Outcome) -> String {
        let stem = match self {
            NameRejection::Blank => "Received blank.".to_string(),
            NameRejection::SpecialCharacters => format!(
                "Please do not include any special characters in the {} name.",
                kind
            ),
            NameRejection::TooLong => format!(
                "Please keep the {} name to {} characters or fewer.",
                kind, MAX_NAME_LENGTH
            ),
            NameRejection::Duplicate => format!(
                "A {} with this name already exists. Please enter a unique name.",
                kind
            ),
        };

        format!("{} {}", stem, outcome.suffix(kind))
    }
}

/// Validate the shape of a submitted name.
///
/// Uniqueness is not checked here; storage does that against the rows it
/// holds. The name is never trimmed or otherwise rewritten.
pub fn validate_name(name: &str) -> Result<(), NameRejection> {
    if name.trim().is_empty() {
        return Err(NameRejection::Blank);
    }

    if has_special_char(name) {
        return Err(NameRejection::SpecialCharacters);
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(NameRejection::TooLong);
    }

    Ok(())
}

/// True when any character is neither alphanumeric nor whitespace
fn has_special_char(value: &str) -> bool {
    value
        .chars()
        .any(|c| !(c.is_alphanumeric() || c.is_whitespace()))
}
