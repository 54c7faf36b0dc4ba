//! Error types for conversation tracking

use thiserror::Error;

/// Context error type
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Conversation not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;
