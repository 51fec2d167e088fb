//! Session state owned by the usage aggregator.
//!
//! All mutation goes through the transition methods below. None of them touch
//! the clock or do I/O: callers pass the current time in, which keeps every
//! transition deterministic under test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::provider::provider_from_model;
use super::usage::UsageSnapshot;

// ============================================================================
// Session State
// ============================================================================

/// Mutable per-session usage state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// When the session (or the process, before any session start) began.
    pub started_at: DateTime<Utc>,
    /// Last model identifier reported by the agent.
    model: Option<String>,
    /// Provider derived from `model`.
    provider: Option<String>,
    /// Tool executions started in this session.
    pub request_count: u64,
    /// Token count from the latest snapshot.
    pub token_count: u64,
    /// Cost in USD from the latest snapshot.
    pub total_cost: f64,
}

impl SessionState {
    /// Creates an empty session starting at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            model: None,
            provider: None,
            request_count: 0,
            token_count: 0,
            total_cost: 0.0,
        }
    }

    /// Returns the active model, if any.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the provider derived from the active model, if any.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Sets the model and re-derives the provider from it.
    pub fn set_model(&mut self, model: impl Into<String>) {
        let model = model.into();
        self.provider = provider_from_model(&model);
        self.model = Some(model);
    }

    /// Records the start of a tool execution.
    ///
    /// Always counts one request; the model is only replaced when the
    /// invocation carries a non-empty one.
    pub fn record_tool_start(&mut self, model: Option<&str>) {
        self.request_count += 1;
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            self.set_model(model);
        }
    }

    /// Drops everything from the previous session.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        *self = Self::new(now);
    }

    /// Replaces the usage totals with a fresh snapshot.
    pub fn apply_snapshot(&mut self, snapshot: UsageSnapshot) {
        self.token_count = snapshot.tokens;
        self.total_cost = snapshot.cost;
    }

    /// Milliseconds elapsed between `started_at` and `now`, floored at zero.
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        u64::try_from((now - self.started_at).num_milliseconds()).unwrap_or(0)
    }
}

// ============================================================================
// Tests
// ============================================================================
