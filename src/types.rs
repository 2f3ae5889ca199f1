//! Core data types for the punchlist task store.

use serde::{Deserialize, Serialize};

/// A single task record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned identifier, positive and never reused
    pub id: u64,

    /// Task text, trimmed and non-empty
    pub text: String,

    /// Whether the task has been completed
    #[serde(default)]
    pub done: bool,
}

/// Counts over the current item list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub open: usize,
    pub done: usize,
}

/// Validation errors for item input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyText,
    InvalidId(String),
    InvalidDone(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyText => write!(f, "text cannot be empty"),
            ValidationError::InvalidId(raw) => {
                write!(f, "invalid id '{}': must be a positive integer", raw)
            }
            ValidationError::InvalidDone(raw) => {
                write!(f, "invalid done '{}': must be 'true' or 'false'", raw)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl Item {
    /// Build a new item from raw text, trimming surrounding whitespace.
    pub fn new(id: u64, text: &str, done: bool) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self {
            id,
            text: text.to_string(),
            done,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_text() {
        let item = Item::new(1, "  Buy milk  ", false).unwrap();
        assert_eq!(item.text, "Buy milk");
        assert!(!item.done);
    }

    #[test]
    fn test_new_rejects_empty_text() {
        assert_eq!(Item::new(1, "", false), Err(ValidationError::EmptyText));
        assert_eq!(Item::new(1, "   \t ", false), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_item_serialization_roundtrip() {
        let item = Item::new(3, "Walk dog", true).unwrap();
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }

    #[test]
    fn test_item_done_defaults_false() {
        let item: Item = serde_json::from_str(r#"{"id":1,"text":"Buy milk"}"#).unwrap();
        assert!(!item.done);
    }
}
