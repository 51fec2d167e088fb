//! Shared fakes for the hook host tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use hookbar_core::{CollectingObserver, ManualClock, Notification, UsageSnapshot};
use hookbar_fetch::{
    AdapterKind, FetchContext, FetchError, NotifyError, ProcessError, Notifier, UsageAdapter,
};
use hookbar_hooks::HookHost;
use hookbar_providers::AdapterRegistry;
use hookbar_store::Settings;

/// Adapter returning a fixed snapshot, or failing.
pub struct FakeAdapter {
    id: &'static str,
    result: Option<UsageSnapshot>,
    calls: AtomicUsize,
}

impl FakeAdapter {
    pub fn ok(id: &'static str, cost: f64, tokens: u64) -> Arc<Self> {
        Arc::new(Self {
            id,
            result: Some(UsageSnapshot::new(cost, tokens)),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(id: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            result: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UsageAdapter for FakeAdapter {
    fn id(&self) -> &str {
        self.id
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::CLI
    }

    async fn fetch_usage(&self, _ctx: &FetchContext) -> Result<UsageSnapshot, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .ok_or(FetchError::Process(ProcessError::NotFound("ccusage".into())))
    }
}

/// Notifier that records everything and optionally fails.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent().into_iter().map(|n| n.message).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            Err(ProcessError::NonZeroExit {
                code: 1,
                stderr: "no display".into(),
            }
            .into())
        } else {
            Ok(())
        }
    }
}

/// In-memory terminal.
#[derive(Clone, Default)]
pub struct Terminal(Arc<Mutex<Vec<u8>>>);

impl Terminal {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// A host wired entirely with fakes.
pub struct Harness {
    pub host: HookHost,
    pub clock: Arc<ManualClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub observer: Arc<CollectingObserver>,
    pub terminal: Terminal,
}

impl Harness {
    pub fn new(status_dir: &Path, registry: AdapterRegistry) -> Self {
        Self::with_notifier(status_dir, registry, RecordingNotifier::default())
    }

    pub fn with_notifier(
        status_dir: &Path,
        registry: AdapterRegistry,
        notifier: RecordingNotifier,
    ) -> Self {
        let settings = Settings {
            status_file: status_dir.join("opencode").join("status.txt"),
            ..Settings::default()
        };
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
        ));
        let notifier = Arc::new(notifier);
        let observer = Arc::new(CollectingObserver::new());
        let terminal = Terminal::default();

        let host = HookHost::builder(settings)
            .clock(clock.clone())
            .notifier(notifier.clone())
            .observer(observer.clone())
            .registry(registry)
            .title_writer(Box::new(terminal.clone()))
            .build();

        Self {
            host,
            clock,
            notifier,
            observer,
            terminal,
        }
    }

    pub fn status_path(status_dir: &Path) -> std::path::PathBuf {
        status_dir.join("opencode").join("status.txt")
    }
}

/// Registry with fakes for both built-in providers.
pub fn registry(anthropic: Arc<FakeAdapter>, openai: Arc<FakeAdapter>) -> AdapterRegistry {
    let mut registry = AdapterRegistry::empty();
    registry.register("anthropic", anthropic);
    registry.register("openai", openai);
    registry
}
