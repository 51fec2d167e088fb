//! Core error types for hookbar.

use thiserror::Error;

/// Error decoding a hook message from its wire form.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The input held no message at all.
    #[error("Empty hook message")]
    EmptyMessage,

    /// The input was not a valid hook message.
    #[error("Invalid hook message: {0}")]
    InvalidMessage(#[from] serde_json::Error),
}
