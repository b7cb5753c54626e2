//! Conversation messages and the append-only log that orders them.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    System,
}

/// A single entry of the conversation log. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub sequence: u64,
}

/// Ordered, append-only record of exchanged messages.
///
/// Sequence numbers start at 1 and keep increasing across `clear`, so a
/// subscriber never observes the same number twice.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
    next_sequence: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a copy of the stored entry.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>) -> Message {
        self.next_sequence += 1;
        let message = Message {
            sender,
            text: text.into(),
            sequence: self.next_sequence,
        };
        self.messages.push(message.clone());
        message
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// User and assistant turns only; local system notices are dropped.
    pub fn dialogue(&self) -> Vec<Message> {
        self.messages
            .iter()
            .filter(|m| m.sender != Sender::System)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
