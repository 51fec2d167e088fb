//! Session report parser.
//!
//! The usage-report command prints a JSON array with one entry per session
//! of the day:
//!
//! ```json
//! [
//!   { "cost": 1.5, "input_tokens": 10, "output_tokens": 5 },
//!   { "cost": 2.0, "input_tokens": 1, "output_tokens": 1 }
//! ]
//! ```

use hookbar_core::UsageSnapshot;
use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;

/// One session entry of the report. Missing or null fields count as zero.
#[derive(Debug, Default, Deserialize)]
pub struct SessionEntry {
    /// Cost in USD.
    #[serde(default)]
    pub cost: Option<f64>,
    /// Prompt tokens.
    #[serde(default)]
    pub input_tokens: Option<u64>,
    /// Completion tokens.
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

impl SessionEntry {
    fn tokens(&self) -> u64 {
        self.input_tokens
            .unwrap_or(0)
            .saturating_add(self.output_tokens.unwrap_or(0))
    }
}

/// Parses the report into a snapshot.
///
/// Empty (or whitespace-only) output is an empty report.
pub fn parse_session_report(stdout: &str) -> Result<UsageSnapshot, ProviderError> {
    let body = stdout.trim();
    let body = if body.is_empty() { "[]" } else { body };

    let entries: Vec<SessionEntry> = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidReport(format!("expected a JSON array: {e}")))?;

    debug!(sessions = entries.len(), "Parsed session report");

    Ok(entries
        .iter()
        .fold(UsageSnapshot::zero(), |acc, entry| {
            UsageSnapshot::new(
                acc.cost + entry.cost.unwrap_or(0.0),
                acc.tokens.saturating_add(entry.tokens()),
            )
        }))
}
