// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # hookbar Core
//!
//! Core types, models, and traits shared by every hookbar crate.
//!
//! ## Key Types
//!
//! ### Session
//! - [`SessionState`] - Per-session usage state with pure transitions
//! - [`UsageSnapshot`] - Cost/token totals from a provider adapter
//! - [`StatusLine`] - Rendered status line
//!
//! ### Hook Payloads
//! - [`HookMessage`] - One callback from the agent runtime
//! - [`LifecycleEvent`] / [`EventKind`] - Lifecycle events
//! - [`ToolInvocation`] / [`ToolOutput`] - Tool-execution boundaries
//!
//! ### Notifications
//! - [`Notification`], [`Sound`], [`SoundClass`]
//!
//! ### Seams
//! - [`Clock`] - Injected time source
//! - [`DegradeObserver`] - Sees failures the hooks swallow

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Hook payloads
    EventKind,
    HookMessage,
    LifecycleEvent,
    ToolContext,
    ToolInvocation,
    ToolOutput,
    // Notifications
    Notification,
    Sound,
    SoundClass,
    // Providers
    MODEL_SEPARATOR,
    ProviderKind,
    provider_from_model,
    // Session & usage
    SessionState,
    UsageSnapshot,
    // Status line
    STATUS_ICON,
    StatusLine,
    UNKNOWN,
    format_cost,
};

// Re-export traits
pub use traits::{
    Clock, CollectingObserver, DegradeEvent, DegradeObserver, DegradeSource, ManualClock,
    SystemClock, TracingObserver,
};
