//! Domain models for hookbar.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider kinds and derivation from model identifiers
//! - [`usage`] - Usage snapshots reported by provider adapters
//! - [`session`] - Per-session state owned by the usage aggregator
//! - [`event`] - Inbound hook payloads
//! - [`notification`] - Desktop notification types
//! - [`status`] - Status line rendering

mod event;
mod notification;
mod provider;
mod session;
mod status;
mod usage;

pub use event::{EventKind, HookMessage, LifecycleEvent, ToolContext, ToolInvocation, ToolOutput};
pub use notification::{Notification, Sound, SoundClass};
pub use provider::{MODEL_SEPARATOR, ProviderKind, provider_from_model};
pub use session::SessionState;
pub use status::{STATUS_ICON, StatusLine, UNKNOWN, format_cost};
pub use usage::UsageSnapshot;
