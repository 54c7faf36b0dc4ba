//! Honeypot Context - conversation tracking and engagement orchestration
//!
//! This crate provides:
//! - The conversation store (append-only, keyed by conversation ID)
//! - The engagement engine that turns each inbound message into a response

pub mod context;
pub mod engagement;
pub mod error;
pub mod store;

pub use context::{Conversation, Message};
pub use engagement::EngagementEngine;
pub use error::{ContextError, ContextResult};
pub use store::{ConversationStore, InMemoryConversationStore};

/// Prelude for common imports
pub mod prelude {
    pub use crate::context::{Conversation, Message};
    pub use crate::engagement::EngagementEngine;
    pub use crate::error::{ContextError, ContextResult};
    pub use crate::store::{ConversationStore, InMemoryConversationStore};
}
