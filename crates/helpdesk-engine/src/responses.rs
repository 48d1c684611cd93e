//! Response table for the helpdesk classifier.
//!
//! The table is an ordered list of category phrases plus two fallback pools.
//! Order matters: the first phrase found in an utterance wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Substrings that route an unmatched utterance to the greeting pool.
pub const GREETING_TRIGGERS: [&str; 3] = ["hi", "hello", "hey"];

/// First message shown in every new conversation.
pub const WELCOME_MESSAGE: &str = "Welcome to AI Helpdesk! How can I assist you today?";

/// A category phrase and its canned response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Lowercase substring to look for.
    pub phrase: String,
    /// Response returned when the phrase matches.
    pub response: String,
}

impl Category {
    /// Create a new category.
    pub fn new(phrase: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            response: response.into(),
        }
    }
}

/// Static lookup table used to answer utterances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTable {
    /// Category phrases in match order.
    pub categories: Vec<Category>,
    /// Replies for greetings.
    pub greetings: Vec<String>,
    /// Replies when nothing matched.
    pub unknown: Vec<String>,
}

impl ResponseTable {
    /// The built-in helpdesk table.
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                Category::new(
                    "document request",
                    "For document requests, please provide your student/employee ID and specify the document type.",
                ),
                Category::new(
                    "technical support",
                    "Our technical support team is available 24/7. What specific issue are you experiencing?",
                ),
                Category::new(
                    "event schedule",
                    "I can help you with event schedules. Which department or type of events are you interested in?",
                ),
                Category::new(
                    "academic info",
                    "For academic information, please specify your query about courses, schedules, or requirements.",
                ),
                Category::new(
                    "hr inquiry",
                    "HR-related queries can be directed to our support team. What specific information do you need?",
                ),
            ],
            greetings: vec![
                "Hello! How can I assist you today?".into(),
                "Welcome! I'm here to help with your queries.".into(),
                "Hi there! What information do you need?".into(),
            ],
            unknown: vec![
                "I'm not sure about that. Could you please rephrase?".into(),
                "I didn't quite understand. Can you provide more details?".into(),
                "That's a bit complex. Let me connect you with a human representative.".into(),
            ],
        }
    }

    /// Check the table invariants.
    ///
    /// Pools must be non-empty and every phrase must be a unique, non-empty,
    /// lowercase string.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.categories.is_empty() {
            return Err(TableError::EmptyPool("categories"));
        }
        if self.greetings.is_empty() {
            return Err(TableError::EmptyPool("greetings"));
        }
        if self.unknown.is_empty() {
            return Err(TableError::EmptyPool("unknown"));
        }

        let mut seen = HashSet::new();
        for (index, category) in self.categories.iter().enumerate() {
            if category.phrase.is_empty() {
                return Err(TableError::EmptyPhrase(index));
            }
            if category.phrase != category.phrase.to_lowercase() {
                return Err(TableError::NotLowercase(category.phrase.clone()));
            }
            if !seen.insert(category.phrase.as_str()) {
                return Err(TableError::DuplicatePhrase(category.phrase.clone()));
            }
        }

        Ok(())
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Violations of the response table invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A pool has no entries.
    #[error("response pool `{0}` is empty")]
    EmptyPool(&'static str),

    /// A category phrase is the empty string.
    #[error("category {0} has an empty phrase")]
    EmptyPhrase(usize),

    /// A category phrase contains uppercase characters.
    #[error("category phrase `{0}` is not lowercase")]
    NotLowercase(String),

    /// Two categories share a phrase.
    #[error("category phrase `{0}` is defined more than once")]
    DuplicatePhrase(String),
}
