//! Trait definitions for hookbar.
//!
//! Two seams live here because every other crate needs them:
//!
//! - [`Clock`] - where "now" comes from, so session timing can be tested
//! - [`DegradeObserver`] - sees failures that are deliberately swallowed

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

// ============================================================================
// Clock
// ============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = *now + by;
    }

    /// Moves the clock forward by a number of milliseconds.
    pub fn advance_ms(&self, ms: i64) {
        self.advance(Duration::milliseconds(ms));
    }

    /// Jumps to an absolute time.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ============================================================================
// Degrade Observer
// ============================================================================

/// Where a swallowed failure happened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DegradeSource {
    /// A usage adapter failed; the refresh used a zero snapshot.
    Adapter(String),
    /// The notifier failed; the notification was dropped.
    Notifier,
    /// Writing the status file failed.
    StatusFile,
    /// Setting the terminal title failed.
    TerminalTitle,
}

impl fmt::Display for DegradeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adapter(id) => write!(f, "adapter:{id}"),
            Self::Notifier => f.write_str("notifier"),
            Self::StatusFile => f.write_str("status_file"),
            Self::TerminalTitle => f.write_str("terminal_title"),
        }
    }
}

/// A failure that was replaced by its degraded default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradeEvent {
    /// Where it happened.
    pub source: DegradeSource,
    /// Rendered error.
    pub error: String,
}

impl DegradeEvent {
    /// Creates an event from any displayable error.
    pub fn new(source: DegradeSource, error: impl fmt::Display) -> Self {
        Self {
            source,
            error: error.to_string(),
        }
    }
}

/// Observes failures that never reach the host.
///
/// Observers must not affect control flow; they exist for diagnosis only.
pub trait DegradeObserver: Send + Sync {
    /// Called once per swallowed failure.
    fn observe(&self, event: &DegradeEvent);
}

/// Logs swallowed failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DegradeObserver for TracingObserver {
    fn observe(&self, event: &DegradeEvent) {
        warn!(source = %event.source, error = %event.error, "Degraded to default");
    }
}

/// Keeps every observed failure in memory.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<DegradeEvent>>,
}

impl CollectingObserver {
    /// Creates an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything observed so far.
    pub fn events(&self) -> Vec<DegradeEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Returns how many failures came from `source`.
    pub fn count(&self, source: &DegradeSource) -> usize {
        self.events().iter().filter(|e| &e.source == source).count()
    }
}

impl DegradeObserver for CollectingObserver {
    fn observe(&self, event: &DegradeEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event.clone());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advances() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);

        clock.advance_ms(1500);
        assert_eq!(clock.now(), start + Duration::milliseconds(1500));
    }

    #[test]
    fn test_collecting_observer() {
        let observer = CollectingObserver::new();
        observer.observe(&DegradeEvent::new(DegradeSource::Notifier, "boom"));
        observer.observe(&DegradeEvent::new(
            DegradeSource::Adapter("openai".into()),
            "401",
        ));

        assert_eq!(observer.events().len(), 2);
        assert_eq!(observer.count(&DegradeSource::Notifier), 1);
        assert_eq!(observer.count(&DegradeSource::TerminalTitle), 0);
    }

    #[test]
    fn test_degrade_source_display() {
        assert_eq!(
            DegradeSource::Adapter("anthropic".into()).to_string(),
            "adapter:anthropic"
        );
        assert_eq!(DegradeSource::StatusFile.to_string(), "status_file");
    }
}
