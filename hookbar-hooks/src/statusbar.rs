//! Live usage/cost status line.
//!
//! [`UsageAggregator`] owns the session state. Tool boundaries and lifecycle
//! events update it, refresh usage from the provider's adapter, and publish
//! the rendered line to every status sink.

use std::sync::Arc;

use hookbar_core::{
    DegradeEvent, DegradeObserver, DegradeSource, EventKind, HookMessage, LifecycleEvent,
    Notification, SessionState, Sound, StatusLine, ToolInvocation, TracingObserver, UsageSnapshot,
    format_cost,
};
use hookbar_fetch::{FetchContext, Notifier};
use hookbar_providers::AdapterRegistry;
use hookbar_store::StatusSink;
use tracing::{debug, instrument};

use crate::notifications::deliver;

/// Default title of the end-of-session summary.
pub const DEFAULT_SUMMARY_TITLE: &str = "OpenCode Status";

/// Aggregates usage for the current session and publishes the status line.
pub struct UsageAggregator {
    state: SessionState,
    registry: AdapterRegistry,
    ctx: FetchContext,
    sinks: Vec<Arc<dyn StatusSink>>,
    notifier: Arc<dyn Notifier>,
    observer: Arc<dyn DegradeObserver>,
    summary_title: String,
}

impl UsageAggregator {
    /// Creates an aggregator with no sinks, logging swallowed failures.
    pub fn new(registry: AdapterRegistry, ctx: FetchContext, notifier: Arc<dyn Notifier>) -> Self {
        let state = SessionState::new(ctx.clock.now());
        Self {
            state,
            registry,
            ctx,
            sinks: Vec::new(),
            notifier,
            observer: Arc::new(TracingObserver),
            summary_title: DEFAULT_SUMMARY_TITLE.to_string(),
        }
    }

    /// Adds a status sink. Sinks are published to in insertion order.
    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Sets the degrade observer.
    pub fn with_observer(mut self, observer: Arc<dyn DegradeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Sets the title of the end-of-session summary.
    pub fn with_summary_title(mut self, title: impl Into<String>) -> Self {
        self.summary_title = title.into();
        self
    }

    /// Returns the session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the current status line.
    pub fn status_line(&self) -> StatusLine {
        StatusLine::from_state(&self.state)
    }

    // ========================================================================
    // Hooks
    // ========================================================================

    /// Counts a request and picks up the model. No I/O.
    pub fn on_tool_before(&mut self, input: &ToolInvocation) {
        self.state.record_tool_start(input.model());
        debug!(
            requests = self.state.request_count,
            provider = ?self.state.provider(),
            "Tool started"
        );
    }

    /// Refreshes usage after every tool.
    pub async fn on_tool_after(&mut self) {
        self.refresh().await;
    }

    /// Handles a lifecycle event.
    pub async fn on_event(&mut self, event: &LifecycleEvent) {
        match event.kind {
            EventKind::SessionStart => {
                self.state.reset(self.ctx.clock.now());
                self.refresh().await;
            }
            EventKind::SessionIdle => {
                self.refresh().await;
                let summary = Notification::new(
                    format!(
                        "Session completed - ${} total cost",
                        format_cost(self.state.total_cost)
                    ),
                    &self.summary_title,
                    Sound::Default,
                );
                deliver(self.notifier.as_ref(), self.observer.as_ref(), &summary).await;
            }
            _ => {}
        }
    }

    /// Handles any hook message.
    #[instrument(skip(self, message), fields(hook = message.hook_name()))]
    pub async fn handle(&mut self, message: &HookMessage) {
        match message {
            HookMessage::Event { event } => self.on_event(event).await,
            HookMessage::ToolBefore { input } => self.on_tool_before(input),
            HookMessage::ToolAfter { .. } => self.on_tool_after().await,
        }
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Fetches a fresh snapshot for the current provider, stores it, and
    /// publishes the status line. Adapter failures yield a zero snapshot.
    #[instrument(skip(self), fields(provider = ?self.state.provider()))]
    pub async fn refresh(&mut self) -> UsageSnapshot {
        let adapter = self.registry.get(self.state.provider());

        let snapshot = match adapter.fetch_usage(&self.ctx).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.observer.observe(&DegradeEvent::new(
                    DegradeSource::Adapter(adapter.id().to_string()),
                    e,
                ));
                UsageSnapshot::zero()
            }
        };

        self.state.apply_snapshot(snapshot);
        self.publish().await;
        snapshot
    }

    /// Publishes the current status line to every sink.
    pub async fn publish(&self) -> StatusLine {
        let line = self.status_line();
        for sink in &self.sinks {
            if let Err(e) = sink.publish(&line).await {
                self.observer.observe(&DegradeEvent::new(sink.source(), e));
            }
        }
        debug!(line = %line, "Status published");
        line
    }
}

impl std::fmt::Debug for UsageAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageAggregator")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use hookbar_core::{CollectingObserver, ManualClock};
    use hookbar_fetch::{AdapterKind, FetchError, NotifyError, UsageAdapter};
    use hookbar_store::{StatusFile, StoreError};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        snapshot: Option<UsageSnapshot>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn ok(cost: f64, tokens: u64) -> Arc<Self> {
            Arc::new(Self {
                snapshot: Some(UsageSnapshot::new(cost, tokens)),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                snapshot: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl UsageAdapter for Fixed {
        fn id(&self) -> &str {
            "fixed.test"
        }

        fn kind(&self) -> AdapterKind {
            AdapterKind::CLI
        }

        async fn fetch_usage(&self, _ctx: &FetchContext) -> Result<UsageSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.snapshot
                .ok_or_else(|| FetchError::InvalidResponse("broken".into()))
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notification>>);

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.0.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    struct Unwritable;

    #[async_trait]
    impl StatusSink for Unwritable {
        fn source(&self) -> DegradeSource {
            DegradeSource::TerminalTitle
        }

        async fn publish(&self, _line: &StatusLine) -> Result<(), StoreError> {
            Err(std::io::Error::other("no tty").into())
        }
    }

    fn aggregator(adapter: Arc<Fixed>) -> (UsageAggregator, Arc<Recorder>, Arc<CollectingObserver>) {
        let mut registry = AdapterRegistry::empty();
        registry.register("anthropic", adapter);
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap());
        let ctx = FetchContext::builder().clock(Arc::new(clock)).build();
        let notifier = Arc::new(Recorder::default());
        let observer = Arc::new(CollectingObserver::new());
        let aggregator = UsageAggregator::new(registry, ctx, notifier.clone())
            .with_observer(observer.clone());
        (aggregator, notifier, observer)
    }

    #[tokio::test]
    async fn test_tool_before_counts_without_io() {
        let adapter = Fixed::ok(1.0, 1);
        let (mut agg, _, _) = aggregator(adapter.clone());

        for _ in 0..3 {
            agg.handle(&HookMessage::ToolBefore {
                input: ToolInvocation::new("read").with_model("anthropic/claude-sonnet-4"),
            })
            .await;
        }

        assert_eq!(agg.state().request_count, 3);
        assert_eq!(agg.state().provider(), Some("anthropic"));
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_uses_provider_adapter() {
        let adapter = Fixed::ok(3.5, 17);
        let (mut agg, _, observer) = aggregator(adapter.clone());
        agg.on_tool_before(&ToolInvocation::new("bash").with_model("anthropic/claude"));

        let snapshot = agg.refresh().await;

        assert_eq!(snapshot, UsageSnapshot::new(3.5, 17));
        assert_eq!(agg.state().token_count, 17);
        assert!(observer.events().is_empty());
        assert_eq!(
            agg.status_line().render(),
            "📊 anthropic | anthropic/claude | Requests: 1 | Tokens: 17 | Cost: $3.5000"
        );
    }

    #[tokio::test]
    async fn test_unknown_provider_uses_null_adapter() {
        let adapter = Fixed::ok(3.5, 17);
        let (mut agg, _, _) = aggregator(adapter.clone());
        agg.on_tool_before(&ToolInvocation::new("bash").with_model("google/gemini"));

        assert!(agg.refresh().await.is_zero());
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_adapter_failure_degrades_to_zero() {
        let (mut agg, _, observer) = aggregator(Fixed::failing());
        agg.on_tool_before(&ToolInvocation::new("bash").with_model("anthropic/claude"));
        agg.state.apply_snapshot(UsageSnapshot::new(9.0, 9));

        let snapshot = agg.refresh().await;

        assert!(snapshot.is_zero());
        assert_eq!(agg.state().total_cost, 0.0);
        assert_eq!(
            observer.count(&DegradeSource::Adapter("fixed.test".into())),
            1
        );
    }

    #[tokio::test]
    async fn test_session_start_resets_then_refreshes() {
        let adapter = Fixed::ok(0.5, 4);
        let (mut agg, _, _) = aggregator(adapter.clone());
        agg.on_tool_before(&ToolInvocation::new("bash").with_model("anthropic/claude"));
        agg.on_tool_after().await;

        agg.handle(&HookMessage::event(EventKind::SessionStart)).await;

        assert_eq!(agg.state().request_count, 0);
        assert_eq!(agg.state().model(), None);
        assert_eq!(agg.state().provider(), None);
        assert_eq!(agg.state().token_count, 0);
        assert_eq!(agg.state().total_cost, 0.0);
        // The reset cleared the provider, so the second refresh hit the null adapter.
        assert_eq!(adapter.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_idle_sends_summary() {
        let (mut agg, notifier, _) = aggregator(Fixed::ok(1.5, 10));
        agg.on_tool_before(&ToolInvocation::new("bash").with_model("anthropic/claude"));

        agg.handle(&HookMessage::event(EventKind::SessionIdle)).await;

        let sent = notifier.0.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].message, "Session completed - $1.5000 total cost");
        assert_eq!(sent[0].title, "OpenCode Status");
        assert_eq!(sent[0].sound, Sound::Default);
    }

    #[tokio::test]
    async fn test_other_events_are_ignored() {
        let adapter = Fixed::ok(1.0, 1);
        let (mut agg, notifier, _) = aggregator(adapter.clone());
        agg.on_tool_before(&ToolInvocation::new("bash").with_model("anthropic/claude"));

        for kind in [
            EventKind::SessionError,
            EventKind::ApprovalRequired,
            EventKind::Unknown,
        ] {
            agg.handle(&HookMessage::event(kind)).await;
        }

        assert_eq!(adapter.calls.load(Ordering::SeqCst), 0);
        assert!(notifier.0.lock().unwrap().is_empty());
        assert_eq!(agg.state().request_count, 1);
    }

    #[tokio::test]
    async fn test_publish_writes_file_and_swallows_sink_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = Arc::new(StatusFile::new(temp_dir.path().join("status.txt")));
        let (agg, _, observer) = aggregator(Fixed::ok(0.0, 0));
        let agg = agg
            .with_sink(Arc::new(Unwritable))
            .with_sink(file.clone());

        let line = agg.publish().await;

        assert_eq!(file.read().await.unwrap(), line.render());
        assert_eq!(observer.count(&DegradeSource::TerminalTitle), 1);
    }
}
