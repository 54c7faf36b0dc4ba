//! Conversation store trait and implementations

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::context::{Conversation, Message};
use crate::error::{ContextError, ContextResult};

/// Keyed, append-only conversation storage.
///
/// Implementations must serialize appends to the same conversation ID so no
/// append is lost and turn order is consistent. Appends to different IDs
/// need no mutual exclusion.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Append a message, creating the conversation on first use. Returns a
    /// snapshot of the conversation including the new message.
    async fn append(&self, conversation_id: &str, content: String) -> ContextResult<Conversation>;

    /// Get a conversation by ID
    async fn get(&self, conversation_id: &str) -> ContextResult<Conversation>;

    /// Number of conversations tracked
    async fn conversation_count(&self) -> usize;
}

/// Process-lifetime in-memory store.
///
/// Conversations are never evicted, so memory grows with every new ID and
/// every message.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Arc<Mutex<Conversation>>>>,
}

impl InMemoryConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, conversation_id: &str) -> Arc<Mutex<Conversation>> {
        if let Some(slot) = self.conversations.read().await.get(conversation_id) {
            return Arc::clone(slot);
        }

        let mut conversations = self.conversations.write().await;
        Arc::clone(
            conversations
                .entry(conversation_id.to_string())
                .or_insert_with(|| {
                    tracing::debug!(conversation_id, "tracking new conversation");
                    Arc::new(Mutex::new(Conversation::new(conversation_id)))
                }),
        )
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(&self, conversation_id: &str, content: String) -> ContextResult<Conversation> {
        let slot = self.slot(conversation_id).await;
        let mut conversation = slot.lock().await;
        conversation.add_message(Message::new(content));
        Ok(conversation.clone())
    }

    async fn get(&self, conversation_id: &str) -> ContextResult<Conversation> {
        let slot = self
            .conversations
            .read()
            .await
            .get(conversation_id)
            .cloned()
            .ok_or_else(|| ContextError::NotFound(conversation_id.to_string()))?;
        let conversation = slot.lock().await;
        Ok(conversation.clone())
    }

    async fn conversation_count(&self) -> usize {
        self.conversations.read().await.len()
    }
}
