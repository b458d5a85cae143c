//! Conversation message entity

use crate::core::identity::Identity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single transcript entry (Entity)
///
/// Immutable once appended; the log order is the conversational order.
/// Failed turns are kept in the transcript with `is_error` set, still
/// attributed to the identity whose turn failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub author: Identity,
    pub content: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl Message {
    /// A message written by the human participant
    pub fn human(content: impl Into<String>) -> Self {
        Self::reply(Identity::User, content)
    }

    /// A normal reply from `author`
    pub fn reply(author: Identity, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            author,
            content: content.into(),
            is_error: false,
        }
    }

    /// An error-flagged entry describing why `author`'s turn failed
    pub fn error(author: Identity, description: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::reply(author, description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = Message::human("topic");
        let b = Message::human("topic");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_error_message_keeps_author() {
        let msg = Message::error(Identity::Grok, "Request timed out");
        assert!(msg.is_error);
        assert_eq!(msg.author, Identity::Grok);
        assert_eq!(msg.content, "Request timed out");
    }

    #[test]
    fn test_is_error_omitted_when_false() {
        let json = serde_json::to_value(Message::reply(Identity::Zai, "hi")).unwrap();
        assert!(json.get("is_error").is_none());
        assert_eq!(json["author"], "zai");
    }
}
