// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # hookbar Fetch
//!
//! Host APIs and the usage adapter contract for hookbar.
//!
//! ## Host APIs
//!
//! The [`host`] module wraps every side effect the hooks perform outside the
//! filesystem:
//!
//! - [`host::process`] - Subprocess execution for CLI tools
//! - [`host::http`] - HTTP client with tracing
//! - [`host::notify`] - Desktop notifications
//!
//! ## Adapters
//!
//! - [`adapter::UsageAdapter`] - Trait for provider usage sources
//! - [`context::FetchContext`] - Host APIs handed to every adapter
//!
//! ## Example
//!
//! ```ignore
//! use hookbar_fetch::FetchContext;
//!
//! let ctx = FetchContext::new();
//! let snapshot = adapter.fetch_usage(&ctx).await?;
//! ```

pub mod adapter;
pub mod context;
pub mod error;
pub mod host;

// Errors
pub use error::{FetchError, HttpError, NotifyError, ProcessError};

// Host APIs
pub use host::{
    http::HttpClient,
    notify::{CommandNotifier, Notifier, NotifierBackend},
    process::{ProcessOutput, ProcessRunner},
};

// Adapters & context
pub use adapter::{AdapterKind, UsageAdapter};
pub use context::{FetchContext, FetchContextBuilder, FetchSettings};
