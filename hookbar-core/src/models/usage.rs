//! Usage snapshot type.
//!
//! A [`UsageSnapshot`] is a point-in-time reading of "usage so far today" as
//! reported by a provider adapter. Snapshots replace whatever the session held
//! before; they are never added together.

use serde::{Deserialize, Serialize};

// ============================================================================
// Usage Snapshot
// ============================================================================

/// Cost and token totals reported by a provider adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Cost in USD.
    pub cost: f64,
    /// Token count (request count for providers that only report requests).
    pub tokens: u64,
}

impl UsageSnapshot {
    /// Creates a snapshot from explicit totals.
    pub fn new(cost: f64, tokens: u64) -> Self {
        Self { cost, tokens }
    }

    /// The degraded default used whenever an adapter fails.
    pub const fn zero() -> Self {
        Self {
            cost: 0.0,
            tokens: 0,
        }
    }

    /// Returns true if this snapshot carries no usage at all.
    pub fn is_zero(&self) -> bool {
        self.tokens == 0 && self.cost == 0.0
    }
}

// ============================================================================
// Tests
// ============================================================================
