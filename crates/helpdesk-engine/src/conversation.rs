//! Conversation messages and the append-only message list.

use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person typing into the helpdesk.
    User,
    /// The helpdesk assistant.
    Ai,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    text: String,
    sender: Sender,
}

impl Message {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    /// Create an assistant message.
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Ai,
        }
    }

    /// Message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Message author.
    pub fn sender(&self) -> Sender {
        self.sender
    }
}

/// Ordered, append-only list of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// Create a conversation opened by an assistant greeting.
    pub fn seeded(welcome: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::ai(welcome)],
        }
    }

    /// Append a message.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only view of all messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_conversation() {
        let state = ConversationState::seeded("Welcome!");
        assert_eq!(state.len(), 1);
        assert_eq!(state.messages()[0], Message::ai("Welcome!"));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut state = ConversationState::seeded("Welcome!");
        state.append(Message::user("A"));
        state.append(Message::ai("B"));

        let texts: Vec<&str> = state.messages().iter().map(Message::text).collect();
        assert_eq!(texts, vec!["Welcome!", "A", "B"]);
        assert_eq!(state.last().map(Message::sender), Some(Sender::Ai));
    }

    #[test]
    fn test_sender_serialization() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"text":"hi","sender":"user"}"#);
        let parsed: Message = serde_json::from_str(r#"{"text":"ok","sender":"ai"}"#).unwrap();
        assert_eq!(parsed.sender(), Sender::Ai);
    }
}
