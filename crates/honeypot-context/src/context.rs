//! Conversation types

use chrono::{DateTime, Utc};
use honeypot_protocol::ConversationTranscript;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message received from the other party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub received_at: DateTime<Utc>,
}

impl Message {
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            received_at: Utc::now(),
        }
    }
}

/// Append-only message history for one conversation ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.updated_at = message.received_at;
        self.messages.push(message);
    }

    /// Number of messages received so far.
    pub fn turns(&self) -> usize {
        self.messages.len()
    }

    /// All message contents joined by single spaces, in arrival order.
    pub fn transcript(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_transcript(&self) -> ConversationTranscript {
        ConversationTranscript {
            conversation_id: self.id.clone(),
            turns: self.turns(),
            messages: self.messages.iter().map(|m| m.content.clone()).collect(),
        }
    }
}
