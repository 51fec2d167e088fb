//! Fetch context providing access to host APIs.
//!
//! The context is passed to every usage adapter and bundles the process
//! runner, the HTTP client, and the clock.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use hookbar_core::{Clock, SystemClock};

use crate::host::{http::HttpClient, process::ProcessRunner};

// ============================================================================
// Fetch Settings
// ============================================================================

/// Timeouts for host calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Timeout for external commands.
    pub command_timeout: Duration,
    /// Timeout for HTTP requests.
    pub http_timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            command_timeout: Duration::from_secs(30),
            http_timeout: Duration::from_secs(30),
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to usage adapters, giving access to host APIs.
pub struct FetchContext {
    /// HTTP client with tracing.
    pub http: Arc<HttpClient>,
    /// Process runner for external commands.
    pub process: Arc<ProcessRunner>,
    /// Time source.
    pub clock: Arc<dyn Clock>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a new fetch context with default host API implementations.
    pub fn new() -> Self {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns today's date in UTC, the day both usage sources report on.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
pub struct FetchContextBuilder {
    http: Option<Arc<HttpClient>>,
    process: Option<Arc<ProcessRunner>>,
    clock: Option<Arc<dyn Clock>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            http: None,
            process: None,
            clock: None,
            settings: FetchSettings::default(),
        }
    }

    /// Sets the HTTP client.
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the process runner.
    pub fn process(mut self, process: Arc<ProcessRunner>) -> Self {
        self.process = Some(process);
        self
    }

    /// Sets the clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the command timeout.
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.settings.command_timeout = timeout;
        self
    }

    /// Sets the HTTP timeout.
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.settings.http_timeout = timeout;
        self
    }

    /// Builds the fetch context.
    ///
    /// Host APIs that were not supplied are created from the settings.
    pub fn build(self) -> FetchContext {
        let settings = self.settings;
        FetchContext {
            http: self
                .http
                .unwrap_or_else(|| Arc::new(HttpClient::with_timeout(settings.http_timeout))),
            process: self.process.unwrap_or_else(|| {
                Arc::new(ProcessRunner::with_timeout(settings.command_timeout))
            }),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            settings,
        }
    }
}

impl Default for FetchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
