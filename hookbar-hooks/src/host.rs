//! Hook host.
//!
//! [`HookHost`] fans every hook message out to the notification dispatcher
//! and then the usage aggregator, finishing one message before taking the
//! next. [`HookHost::run`] drives it from a JSON-lines stream.

use std::io::Write;
use std::sync::Arc;

use hookbar_core::{
    Clock, CoreError, DegradeObserver, HookMessage, SystemClock, TracingObserver,
};
use hookbar_fetch::{CommandNotifier, FetchContext, HttpClient, Notifier, ProcessRunner};
use hookbar_providers::{AdapterRegistry, AnthropicAdapter, ApiKeySource, OpenAiAdapter};
use hookbar_store::{Settings, StatusFile, TerminalTitle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

use crate::notifications::{NotificationConfig, NotificationDispatcher};
use crate::statusbar::UsageAggregator;

// ============================================================================
// Hook Host
// ============================================================================

/// Totals from one [`HookHost::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Messages handled.
    pub handled: usize,
    /// Lines skipped because they were not valid messages.
    pub skipped: usize,
}

/// Delivers hook messages to both hooks, in order.
#[derive(Debug)]
pub struct HookHost {
    dispatcher: NotificationDispatcher,
    aggregator: UsageAggregator,
}

impl HookHost {
    /// Creates a host from already-wired hooks.
    pub fn new(dispatcher: NotificationDispatcher, aggregator: UsageAggregator) -> Self {
        Self {
            dispatcher,
            aggregator,
        }
    }

    /// Creates a host wired from settings with the real host APIs.
    pub fn from_settings(settings: &Settings) -> Self {
        HookHostBuilder::new(settings.clone()).build()
    }

    /// Creates a builder for overriding individual collaborators.
    pub fn builder(settings: Settings) -> HookHostBuilder {
        HookHostBuilder::new(settings)
    }

    /// Returns the notification dispatcher.
    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    /// Returns the usage aggregator.
    pub fn aggregator(&self) -> &UsageAggregator {
        &self.aggregator
    }

    /// Handles one message: notifications first, then usage.
    pub async fn handle(&mut self, message: &HookMessage) {
        self.dispatcher.handle(message).await;
        self.aggregator.handle(message).await;
    }

    /// Parses and handles one JSON line.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the line is not a hook message; nothing is
    /// handled in that case.
    pub async fn handle_line(&mut self, line: &str) -> Result<(), CoreError> {
        let message = HookMessage::from_json(line)?;
        self.handle(&message).await;
        Ok(())
    }

    /// Handles JSON-lines messages until EOF. Blank lines are ignored and
    /// malformed lines are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading the stream fails.
    #[instrument(skip(self, reader))]
    pub async fn run<R>(&mut self, reader: R) -> std::io::Result<RunStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut stats = RunStats::default();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match self.handle_line(line).await {
                Ok(()) => stats.handled += 1,
                Err(e) => {
                    warn!(error = %e, "Skipping malformed hook message");
                    stats.skipped += 1;
                }
            }
        }

        info!(handled = stats.handled, skipped = stats.skipped, "Input closed");
        Ok(stats)
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builds the standard adapter registry from settings.
pub fn registry_from_settings(settings: &Settings) -> AdapterRegistry {
    AdapterRegistry::standard(
        AnthropicAdapter::with_command(settings.usage_command.clone()),
        OpenAiAdapter::new()
            .with_key_source(ApiKeySource::Env(settings.openai_api_key_env.clone()))
            .with_base_url(settings.openai_base_url.clone()),
    )
}

/// Builder for a [`HookHost`].
///
/// Anything not overridden is created from the settings.
pub struct HookHostBuilder {
    settings: Settings,
    clock: Option<Arc<dyn Clock>>,
    observer: Option<Arc<dyn DegradeObserver>>,
    notifier: Option<Arc<dyn Notifier>>,
    registry: Option<AdapterRegistry>,
    title_writer: Option<Box<dyn Write + Send>>,
}

impl HookHostBuilder {
    /// Creates a builder from settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            clock: None,
            observer: None,
            notifier: None,
            registry: None,
            title_writer: None,
        }
    }

    /// Sets the clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the degrade observer.
    pub fn observer(mut self, observer: Arc<dyn DegradeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets the notifier.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Sets the adapter registry.
    pub fn registry(mut self, registry: AdapterRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sends the terminal title escape somewhere other than stdout.
    pub fn title_writer(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.title_writer = Some(writer);
        self
    }

    /// Builds the host.
    pub fn build(self) -> HookHost {
        let settings = self.settings;
        let fetch_settings = settings.fetch_settings();

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let observer = self.observer.unwrap_or_else(|| Arc::new(TracingObserver));
        let process = Arc::new(ProcessRunner::with_timeout(fetch_settings.command_timeout));

        let notifier = self.notifier.unwrap_or_else(|| {
            Arc::new(CommandNotifier::new(settings.notifier, process.clone()))
        });

        let registry = self
            .registry
            .unwrap_or_else(|| registry_from_settings(&settings));

        let ctx = FetchContext::builder()
            .http(Arc::new(HttpClient::with_timeout(fetch_settings.http_timeout)))
            .process(process)
            .clock(clock.clone())
            .settings(fetch_settings)
            .build();

        let dispatcher = NotificationDispatcher::new(
            NotificationConfig {
                title: settings.notification_title.clone(),
                idle_threshold_ms: settings.idle_threshold_ms,
                long_command_threshold_ms: settings.long_command_threshold_ms,
            },
            notifier.clone(),
            observer.clone(),
            clock,
        );

        let mut aggregator = UsageAggregator::new(registry, ctx, notifier)
            .with_observer(observer)
            .with_summary_title(settings.summary_title.clone())
            .with_sink(Arc::new(StatusFile::new(settings.status_file.clone())));

        if settings.terminal_title {
            let title = match self.title_writer {
                Some(writer) => TerminalTitle::with_writer(settings.title_prefix.clone(), writer),
                None => TerminalTitle::stdout(settings.title_prefix.clone()),
            };
            aggregator = aggregator.with_sink(Arc::new(title));
        }

        debug!(
            status_file = %settings.status_file.display(),
            notifier = ?settings.notifier,
            "Hook host ready"
        );

        HookHost::new(dispatcher, aggregator)
    }
}

impl std::fmt::Debug for HookHostBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookHostBuilder")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
