//! Status line rendering.
//!
//! The status line is a single human-readable line, e.g.
//!
//! ```text
//! 📊 anthropic | anthropic/claude-sonnet-4 | Requests: 12 | Tokens: 48211 | Cost: $1.2345
//! ```
//!
//! It is written for people, not for re-parsing.

use std::fmt;

use super::session::SessionState;

/// Icon that leads every status line.
pub const STATUS_ICON: &str = "📊";

/// Placeholder for a missing provider or model.
pub const UNKNOWN: &str = "Unknown";

/// A rendered view of the current session usage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusLine {
    /// Provider id, if known.
    pub provider: Option<String>,
    /// Model identifier, if known.
    pub model: Option<String>,
    /// Requests so far.
    pub requests: u64,
    /// Tokens from the latest snapshot.
    pub tokens: u64,
    /// Cost from the latest snapshot.
    pub cost: f64,
}

impl StatusLine {
    /// Captures the current state of a session.
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            provider: state.provider().map(str::to_string),
            model: state.model().map(str::to_string),
            requests: state.request_count,
            tokens: state.token_count,
            cost: state.total_cost,
        }
    }

    /// Renders the line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Formats a cost with four decimal places, as shown everywhere in hookbar.
pub fn format_cost(cost: f64) -> String {
    format!("{cost:.4}")
}

// Empty strings count as missing, like an unset field.
fn or_unknown(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN,
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{STATUS_ICON} {} | {} | Requests: {} | Tokens: {} | Cost: ${}",
            or_unknown(self.provider.as_deref()),
            or_unknown(self.model.as_deref()),
            self.requests,
            self.tokens,
            format_cost(self.cost),
        )
    }
}
