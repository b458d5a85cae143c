//! Conversation store: the message log plus chat-level session state

use super::message::Message;
use crate::core::identity::Identity;
use crate::core::topic::Topic;
use serde::Serialize;

/// Chat-level state that accompanies the message log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatSession {
    pub topic: String,
    pub is_running: bool,
    /// Identity whose reply is currently being resolved
    pub resolving: Option<Identity>,
    /// Index into the rotation of the next identity to speak
    pub turn_pointer: usize,
    pub last_error: Option<String>,
}

/// Point-in-time copy of the store, safe to hand to readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatSnapshot {
    pub topic: String,
    pub messages: Vec<Message>,
    pub is_running: bool,
    pub resolving: Option<Identity>,
    pub turn_pointer: usize,
    pub last_error: Option<String>,
}

impl ChatSnapshot {
    /// Number of AI turns recorded (successful or failed)
    pub fn turns_taken(&self) -> usize {
        self.messages.iter().filter(|m| !m.author.is_human()).count()
    }
}

/// Owner of the message log and session state.
///
/// Plain state holder; the scheduler is its only writer. Readers get a
/// [`ChatSnapshot`], so no one observes a half-applied mutation.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    session: ChatSession,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset everything and seed the log with the human-authored topic.
    pub fn seed(&mut self, topic: Topic) {
        self.reset();
        let content = topic.into_content();
        self.session.topic = content.clone();
        self.messages.push(Message::human(content));
    }

    pub fn append_message(&mut self, message: Message) {
        debug_assert!(
            !self.messages.is_empty() || message.author.is_human(),
            "first message must come from the human"
        );
        self.messages.push(message);
    }

    pub fn set_running(&mut self, running: bool) {
        self.session.is_running = running;
    }

    pub fn set_resolving(&mut self, identity: Option<Identity>) {
        self.session.resolving = identity;
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.session.topic = topic.into();
    }

    pub fn set_turn_pointer(&mut self, pointer: usize) {
        self.session.turn_pointer = pointer;
    }

    pub fn set_last_error(&mut self, error: Option<String>) {
        self.session.last_error = error;
    }

    /// Empty log, cleared topic, pointer at slot 0, not running.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.session = ChatSession::default();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            topic: self.session.topic.clone(),
            messages: self.messages.clone(),
            is_running: self.session.is_running,
            resolving: self.session.resolving,
            turn_pointer: self.session.turn_pointer,
            last_error: self.session.last_error.clone(),
        }
    }
}
