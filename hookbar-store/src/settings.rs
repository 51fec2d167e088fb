//! User settings.
//!
//! Settings live in `<config dir>/hookbar/settings.json`. Every field has a
//! default, so an absent file, an empty object, or a partial file all load.

use hookbar_fetch::{FetchSettings, NotifierBackend, host::http::parse_url};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_status_path, load_json, save_json};

// ============================================================================
// Settings
// ============================================================================

/// hookbar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ========================================================================
    // Status publishing
    // ========================================================================
    /// File the status line is written to.
    pub status_file: PathBuf,

    /// Mirror the status line into the terminal title.
    pub terminal_title: bool,

    /// Text placed before the status line in the terminal title.
    pub title_prefix: String,

    // ========================================================================
    // Notifications
    // ========================================================================
    /// Notifier command.
    pub notifier: NotifierBackend,

    /// Title of event notifications.
    pub notification_title: String,

    /// Title of the end-of-session cost summary.
    pub summary_title: String,

    /// A session.idle after more than this many milliseconds is a long session.
    pub idle_threshold_ms: u64,

    /// A bash tool call longer than this many milliseconds is a long command.
    pub long_command_threshold_ms: u64,

    // ========================================================================
    // Usage sources
    // ========================================================================
    /// Usage-report command for Anthropic (program first).
    pub usage_command: Vec<String>,

    /// Environment variable holding the OpenAI API key.
    pub openai_api_key_env: String,

    /// OpenAI API base URL.
    pub openai_base_url: String,

    /// Timeout for external commands, in seconds.
    pub command_timeout_secs: u64,

    /// Timeout for HTTP requests, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            status_file: default_status_path(),
            terminal_title: true,
            title_prefix: "OpenCode - ".to_string(),
            notifier: NotifierBackend::default(),
            notification_title: "opencode".to_string(),
            summary_title: "OpenCode Status".to_string(),
            idle_threshold_ms: 10_000,
            long_command_threshold_ms: 5_000,
            usage_command: ["ccusage", "session", "--json", "--today"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            openai_api_key_env: "OPENAI_API_KEY".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            command_timeout_secs: 30,
            http_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Checks the settings for values that can never work.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.usage_command.first().is_none_or(|c| c.trim().is_empty()) {
            return Err(StoreError::Config("usage_command must name a program".into()));
        }
        if self.command_timeout_secs == 0 {
            return Err(StoreError::Config("command_timeout_secs must be positive".into()));
        }
        if self.http_timeout_secs == 0 {
            return Err(StoreError::Config("http_timeout_secs must be positive".into()));
        }
        if self.openai_api_key_env.trim().is_empty() {
            return Err(StoreError::Config("openai_api_key_env must not be empty".into()));
        }
        parse_url(&self.openai_base_url)
            .map_err(|e| StoreError::Config(format!("openai_base_url: {e}")))?;
        Ok(())
    }

    /// Timeouts for the host APIs.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            command_timeout: Duration::from_secs(self.command_timeout_secs),
            http_timeout: Duration::from_secs(self.http_timeout_secs),
        }
    }

    /// Loads and validates settings. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the loaded settings fail [`Settings::validate`].
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let settings = match load_json::<Self>(path).await {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings, falling back to the defaults on any error.
    pub async fn load_or_default(path: &Path) -> Self {
        Self::load(path).await.unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Invalid settings, using defaults");
            Self::default()
        })
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self, path: &Path) -> Result<(), StoreError> {
        save_json(path, self).await?;
        info!(path = %path.display(), "Settings saved");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
