//! Usage adapter trait and types.
//!
//! An adapter is one way of reading "usage so far today" for a provider.
//! The aggregator picks exactly one adapter per refresh from the provider
//! derived from the active model.

use async_trait::async_trait;
use hookbar_core::UsageSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::FetchContext;
use crate::error::FetchError;

// ============================================================================
// Adapter Kind
// ============================================================================

/// The mechanism an adapter uses to read usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// Local usage-report command.
    CLI,
    /// Remote API authenticated with an API key.
    ApiKey,
    /// No source; always reports zero.
    Null,
}

impl AdapterKind {
    /// Returns the display name for this kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CLI => "CLI",
            Self::ApiKey => "API Key",
            Self::Null => "None",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Usage Adapter Trait
// ============================================================================

/// Reads a usage snapshot for one provider.
///
/// ## Implementing an Adapter
///
/// ```ignore
/// struct LocalReportAdapter;
///
/// #[async_trait]
/// impl UsageAdapter for LocalReportAdapter {
///     fn id(&self) -> &str {
///         "anthropic.cli"
///     }
///
///     fn kind(&self) -> AdapterKind {
///         AdapterKind::CLI
///     }
///
///     async fn fetch_usage(&self, ctx: &FetchContext) -> Result<UsageSnapshot, FetchError> {
///         let stdout = ctx.process.run_for_stdout("ccusage", &["session", "--json"]).await?;
///         // Parse stdout and return the snapshot
///     }
/// }
/// ```
#[async_trait]
pub trait UsageAdapter: Send + Sync {
    /// Unique identifier, formatted `{provider}.{method}`.
    fn id(&self) -> &str;

    /// The mechanism this adapter uses.
    fn kind(&self) -> AdapterKind;

    /// Fetches a fresh snapshot. Never cached.
    async fn fetch_usage(&self, ctx: &FetchContext) -> Result<UsageSnapshot, FetchError>;
}

// ============================================================================
// Tests
// ============================================================================
