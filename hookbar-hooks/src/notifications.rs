//! Desktop notifications for session events.
//!
//! The mapping from hook payloads to notifications is a set of pure
//! functions; [`NotificationDispatcher`] evaluates them and hands each result
//! to a [`Notifier`]. Delivery is fire-and-forget.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use hookbar_core::{
    Clock, DegradeEvent, DegradeObserver, DegradeSource, EventKind, HookMessage, LifecycleEvent,
    Notification, Sound, ToolInvocation, ToolOutput,
};
use hookbar_fetch::{Notifier, NotifyError};
use tracing::{debug, instrument};

// ============================================================================
// Config
// ============================================================================

/// Thresholds and title used by the notification mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Title of every event notification.
    pub title: String,
    /// session.idle notifies only after more than this many milliseconds.
    pub idle_threshold_ms: u64,
    /// bash notifies only when it ran longer than this many milliseconds.
    pub long_command_threshold_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: "opencode".to_string(),
            idle_threshold_ms: 10_000,
            long_command_threshold_ms: 5_000,
        }
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Notifications for a lifecycle event, given the time since the dispatcher
/// started.
pub fn notifications_for_event(
    kind: EventKind,
    elapsed_ms: u64,
    config: &NotificationConfig,
) -> Vec<Notification> {
    let (message, sound) = match kind {
        EventKind::SessionIdle if elapsed_ms > config.idle_threshold_ms => {
            ("Long session completed!", Sound::Default)
        }
        EventKind::SessionError => ("Session encountered an error", Sound::Basso),
        EventKind::ApprovalRequired => ("Waiting for your approval...", Sound::Ping),
        EventKind::ApprovalGranted => ("Approval granted - continuing...", Sound::Glass),
        EventKind::ApprovalDenied => ("Request denied", Sound::Basso),
        EventKind::SessionIdle | EventKind::SessionStart | EventKind::Unknown => {
            return Vec::new();
        }
    };
    vec![Notification::new(message, &config.title, sound)]
}

/// Notifications for a tool that is about to run.
pub fn notifications_for_tool_before(
    input: &ToolInvocation,
    config: &NotificationConfig,
) -> Vec<Notification> {
    if input.is_file_edit() {
        vec![Notification::new(
            format!("Requesting permission for {}", input.tool),
            &config.title,
            Sound::Ping,
        )]
    } else {
        Vec::new()
    }
}

/// Notifications for a tool that finished.
pub fn notifications_for_tool_after(
    input: &ToolInvocation,
    output: &ToolOutput,
    config: &NotificationConfig,
) -> Vec<Notification> {
    let mut out = Vec::new();

    if input.is_file_edit() {
        out.push(Notification::new(
            format!("File {} completed", input.tool),
            &config.title,
            Sound::Glass,
        ));
    }

    #[allow(clippy::cast_precision_loss)]
    let threshold = config.long_command_threshold_ms as f64;
    if input.is_shell() && output.duration.is_some_and(|ms| ms > threshold) {
        out.push(Notification::new(
            "Long command completed",
            &config.title,
            Sound::Blow,
        ));
    }

    out
}

// ============================================================================
// Delivery
// ============================================================================

/// Sends one notification, reporting failures to the observer only.
///
/// A disabled notifier is not a failure.
pub(crate) async fn deliver(
    notifier: &dyn Notifier,
    observer: &dyn DegradeObserver,
    notification: &Notification,
) {
    match notifier.notify(notification).await {
        Ok(()) => {}
        Err(NotifyError::Disabled) => {
            debug!(message = %notification.message, "Notifications disabled, dropped");
        }
        Err(e) => observer.observe(&DegradeEvent::new(DegradeSource::Notifier, e)),
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Turns hook payloads into desktop notifications.
///
/// The idle timer runs from construction; it is not restarted by
/// session.start.
pub struct NotificationDispatcher {
    config: NotificationConfig,
    notifier: Arc<dyn Notifier>,
    observer: Arc<dyn DegradeObserver>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher; its idle timer starts now.
    pub fn new(
        config: NotificationConfig,
        notifier: Arc<dyn Notifier>,
        observer: Arc<dyn DegradeObserver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.now();
        Self {
            config,
            notifier,
            observer,
            clock,
            started_at,
        }
    }

    /// Returns the mapping config.
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Milliseconds since the dispatcher was created.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from((self.clock.now() - self.started_at).num_milliseconds()).unwrap_or(0)
    }

    /// Handles a lifecycle event.
    pub async fn on_event(&self, event: &LifecycleEvent) {
        let notifications = notifications_for_event(event.kind, self.elapsed_ms(), &self.config);
        self.send_all(&notifications).await;
    }

    /// Handles the start of a tool execution.
    pub async fn on_tool_before(&self, input: &ToolInvocation) {
        self.send_all(&notifications_for_tool_before(input, &self.config))
            .await;
    }

    /// Handles the end of a tool execution.
    pub async fn on_tool_after(&self, input: &ToolInvocation, output: &ToolOutput) {
        self.send_all(&notifications_for_tool_after(input, output, &self.config))
            .await;
    }

    /// Handles any hook message.
    #[instrument(skip(self, message), fields(hook = message.hook_name()))]
    pub async fn handle(&self, message: &HookMessage) {
        match message {
            HookMessage::Event { event } => self.on_event(event).await,
            HookMessage::ToolBefore { input } => self.on_tool_before(input).await,
            HookMessage::ToolAfter { input, output } => self.on_tool_after(input, output).await,
        }
    }

    async fn send_all(&self, notifications: &[Notification]) {
        for notification in notifications {
            deliver(self.notifier.as_ref(), self.observer.as_ref(), notification).await;
        }
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("config", &self.config)
            .field("started_at", &self.started_at)
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
    use chrono::TimeZone;
    use hookbar_core::{CollectingObserver, ManualClock, SoundClass};
    use hookbar_fetch::ProcessError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<Notification>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification.clone());
            if self.fail {
                Err(ProcessError::NotFound("terminal-notifier".into()).into())
            } else {
                Ok(())
            }
        }
    }

    fn config() -> NotificationConfig {
        NotificationConfig::default()
    }

    fn messages(notifications: &[Notification]) -> Vec<&str> {
        notifications.iter().map(|n| n.message.as_str()).collect()
    }

    #[test]
    fn test_event_mapping() {
        let cases = [
            (EventKind::SessionError, "Session encountered an error", Sound::Basso),
            (EventKind::ApprovalRequired, "Waiting for your approval...", Sound::Ping),
            (EventKind::ApprovalGranted, "Approval granted - continuing...", Sound::Glass),
            (EventKind::ApprovalDenied, "Request denied", Sound::Basso),
        ];
        for (kind, message, sound) in cases {
            let out = notifications_for_event(kind, 0, &config());
            assert_eq!(out.len(), 1, "{kind}");
            assert_eq!(out[0].message, message);
            assert_eq!(out[0].sound, sound);
            assert_eq!(out[0].title, "opencode");
        }
    }

    #[test]
    fn test_idle_threshold_is_strict() {
        let idle = |ms| notifications_for_event(EventKind::SessionIdle, ms, &config());

        assert_eq!(messages(&idle(15_000)), ["Long session completed!"]);
        assert_eq!(idle(15_000)[0].sound.class(), SoundClass::Success);
        assert!(idle(5_000).is_empty());
        assert!(idle(10_000).is_empty());
        assert_eq!(idle(10_001).len(), 1);
    }

    #[test]
    fn test_silent_events() {
        assert!(notifications_for_event(EventKind::SessionStart, 99_999, &config()).is_empty());
        assert!(notifications_for_event(EventKind::Unknown, 99_999, &config()).is_empty());
    }

    #[test]
    fn test_tool_before_mapping() {
        let edit = notifications_for_tool_before(&ToolInvocation::new("edit"), &config());
        assert_eq!(messages(&edit), ["Requesting permission for edit"]);
        assert_eq!(edit[0].sound, Sound::Ping);

        let write = notifications_for_tool_before(&ToolInvocation::new("write"), &config());
        assert_eq!(messages(&write), ["Requesting permission for write"]);

        assert!(notifications_for_tool_before(&ToolInvocation::new("bash"), &config()).is_empty());
        assert!(notifications_for_tool_before(&ToolInvocation::new("read"), &config()).is_empty());
    }

    #[test]
    fn test_tool_after_mapping() {
        let write = notifications_for_tool_after(
            &ToolInvocation::new("write"),
            &ToolOutput::default(),
            &config(),
        );
        assert_eq!(messages(&write), ["File write completed"]);
        assert_eq!(write[0].sound, Sound::Glass);

        let bash = |ms: Option<f64>| {
            notifications_for_tool_after(
                &ToolInvocation::new("bash"),
                &ToolOutput { duration: ms },
                &config(),
            )
        };
        assert_eq!(messages(&bash(Some(6000.0))), ["Long command completed"]);
        assert_eq!(bash(Some(6000.0))[0].sound, Sound::Blow);
        assert_eq!(messages(&bash(Some(5000.5))), ["Long command completed"]);
        assert!(bash(Some(4000.0)).is_empty());
        assert!(bash(Some(5000.0)).is_empty());
        assert!(bash(Some(-1.0)).is_empty());
        assert!(bash(None).is_empty());

        let slow_edit = notifications_for_tool_after(
            &ToolInvocation::new("edit"),
            &ToolOutput::with_duration(60_000.0),
            &config(),
        );
        assert_eq!(messages(&slow_edit), ["File edit completed"]);
    }

    #[test]
    fn test_custom_title() {
        let config = NotificationConfig {
            title: "agent".into(),
            ..NotificationConfig::default()
        };
        let out = notifications_for_event(EventKind::SessionError, 0, &config);
        assert_eq!(out[0].title, "agent");
    }

    #[tokio::test]
    async fn test_dispatcher_idle_timer_from_construction() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        ));
        let notifier = Arc::new(Recorder::default());
        let dispatcher = NotificationDispatcher::new(
            config(),
            notifier.clone(),
            Arc::new(CollectingObserver::new()),
            clock.clone(),
        );

        clock.advance_ms(5_000);
        dispatcher.handle(&HookMessage::event(EventKind::SessionIdle)).await;
        assert!(notifier.sent.lock().unwrap().is_empty());

        dispatcher.handle(&HookMessage::event(EventKind::SessionStart)).await;
        clock.advance_ms(10_000);
        assert_eq!(dispatcher.elapsed_ms(), 15_000);

        dispatcher.handle(&HookMessage::event(EventKind::SessionIdle)).await;
        assert_eq!(
            messages(&notifier.sent.lock().unwrap()),
            ["Long session completed!"]
        );
    }

    #[tokio::test]
    async fn test_notifier_failure_is_observed_not_raised() {
        let notifier = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let observer = Arc::new(CollectingObserver::new());
        let dispatcher = NotificationDispatcher::new(
            config(),
            notifier.clone(),
            observer.clone(),
            Arc::new(hookbar_core::SystemClock),
        );

        dispatcher
            .handle(&HookMessage::event(EventKind::ApprovalDenied))
            .await;
        dispatcher
            .handle(&HookMessage::event(EventKind::SessionError))
            .await;

        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
        assert_eq!(observer.count(&DegradeSource::Notifier), 2);
    }
}
