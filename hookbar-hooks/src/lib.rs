// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # hookbar Hooks
//!
//! The two agent hooks and the host that drives them.
//!
//! - [`NotificationDispatcher`]: desktop notifications for lifecycle events
//!   and tool boundaries
//! - [`UsageAggregator`]: session usage, refreshed from the provider's
//!   adapter and published as a status line
//! - [`HookHost`]: delivers each message to both, serially
//!
//! No hook ever returns an error. Failures of adapters, the notifier, and
//! status sinks are replaced by their defaults and reported to a
//! [`hookbar_core::DegradeObserver`].
//!
//! ## Usage
//!
//! ```ignore
//! use hookbar_hooks::HookHost;
//! use hookbar_store::Settings;
//!
//! let mut host = HookHost::from_settings(&Settings::default());
//! let stdin = tokio::io::BufReader::new(tokio::io::stdin());
//! host.run(stdin).await?;
//! ```

pub mod host;
pub mod notifications;
pub mod statusbar;

pub use host::{HookHost, HookHostBuilder, RunStats, registry_from_settings};
pub use notifications::{
    NotificationConfig, NotificationDispatcher, notifications_for_event,
    notifications_for_tool_after, notifications_for_tool_before,
};
pub use statusbar::{DEFAULT_SUMMARY_TITLE, UsageAggregator};
