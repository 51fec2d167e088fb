//! Host APIs for hookbar.
//!
//! This module provides abstractions for interacting with external systems:
//!
//! - [`http`] - HTTP client with tracing
//! - [`process`] - Subprocess execution with timeouts
//! - [`notify`] - Desktop notifications through a notifier command

pub mod http;
pub mod notify;
pub mod process;

// Re-export key types
pub use http::HttpClient;
pub use notify::{CommandNotifier, Notifier, NotifierBackend};
pub use process::{ProcessOutput, ProcessRunner};
