use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::Restorable;

/// Opening line shown when a user has no saved conversation
pub const GREETING: &str = "Hi! I'm your CineFlix assistant. Ask me anything about movies! 🎬";

/// Fallback reply when the assistant answers with nothing
pub const EMPTY_REPLY: &str = "Sorry, I could not reply.";

/// Reply recorded when the assistant can't be reached
pub const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Who said a chat line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl Display for ChatRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatRole::User => write!(f, "you"),
            ChatRole::Bot => write!(f, "bot"),
        }
    }
}

/// A single chat turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            text: text.into(),
        }
    }
}

/// Conversation with the assistant, oldest turn first
///
/// Append-only: turns are never merged, deduplicated or dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// A fresh conversation holding only the greeting
    pub fn greeting() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

impl Restorable for ChatTranscript {
    fn restore(stored: Value, _default: &Self) -> Result<Self, String> {
        let messages: Vec<ChatMessage> =
            serde_json::from_value(stored).map_err(|e| format!("not a transcript: {}", e))?;

        if messages.is_empty() {
            return Err("transcript is empty".to_string());
        }

        Ok(Self { messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_greeting_is_single_bot_message() {
        let transcript = ChatTranscript::greeting();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::Bot);
        assert_eq!(transcript.messages()[0].text, GREETING);
    }

    #[test]
    fn test_push_never_deduplicates() {
        let mut transcript = ChatTranscript::greeting();
        transcript.push(ChatMessage::user("hello"));
        transcript.push(ChatMessage::user("hello"));
        assert_eq!(transcript.len(), 3);
    }

    #[test]
    fn test_serialized_layout() {
        let mut transcript = ChatTranscript::default();
        transcript.push(ChatMessage::user("hi"));
        transcript.push(ChatMessage::bot("hello!"));

        let json = serde_json::to_value(&transcript).unwrap();
        assert_eq!(
            json,
            json!([{"role": "user", "text": "hi"}, {"role": "bot", "text": "hello!"}])
        );
    }

    #[test]
    fn test_restore_keeps_order() {
        let restored = ChatTranscript::restore(
            json!([
                {"role": "bot", "text": "hi"},
                {"role": "user", "text": "recommend something"},
                {"role": "bot", "text": "Inception"}
            ]),
            &ChatTranscript::greeting(),
        )
        .unwrap();

        let texts: Vec<&str> = restored.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "recommend something", "Inception"]);
    }

    #[test]
    fn test_restore_rejects_empty_array() {
        assert!(ChatTranscript::restore(json!([]), &ChatTranscript::greeting()).is_err());
    }

    #[test]
    fn test_restore_rejects_non_array() {
        assert!(ChatTranscript::restore(json!({"role": "bot"}), &ChatTranscript::greeting()).is_err());
    }

    #[test]
    fn test_restore_rejects_unknown_role() {
        let stored = json!([{"role": "system", "text": "?"}]);
        assert!(ChatTranscript::restore(stored, &ChatTranscript::greeting()).is_err());
    }
}
