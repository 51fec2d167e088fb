//! Fetch error types.

use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for usage adapters.
///
/// Adapters return these freely; the aggregator turns every one of them into
/// a zero snapshot, so none of them ever reaches the agent runtime.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The server answered with a non-success status.
    #[error("Unexpected HTTP status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// A credential the adapter needs is not available.
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Invalid response from the provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Process error.
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Process Error
// ============================================================================

/// Error type for process operations.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Command not found.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// The argument vector had no program.
    #[error("Empty command")]
    EmptyCommand,

    /// Command timed out.
    #[error("Command timed out after {0:?}")]
    Timeout(Duration),

    /// Non-zero exit code.
    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code from the process.
        code: i32,
        /// Standard error output.
        stderr: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Notify Error
// ============================================================================

/// Error type for desktop notifications.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Notifications are switched off.
    #[error("Notifications disabled")]
    Disabled,

    /// The notifier command failed.
    #[error("Notifier failed: {0}")]
    Process(#[from] ProcessError),
}
