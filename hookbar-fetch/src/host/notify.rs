//! Desktop notifications.
//!
//! Notifications are delivered by running a platform notifier command
//! (`terminal-notifier`, `notify-send`, or `osascript`). Callers treat
//! delivery as fire-and-forget; [`Notifier::notify`] still reports failures
//! so they can be logged.

use std::sync::Arc;

use async_trait::async_trait;
use hookbar_core::Notification;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::NotifyError;
use crate::host::process::ProcessRunner;

/// App name reported to freedesktop notification daemons.
const APP_NAME: &str = "hookbar";

// ============================================================================
// Backend
// ============================================================================

/// Which notifier command to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifierBackend {
    /// `terminal-notifier` (macOS, Homebrew).
    TerminalNotifier,
    /// `notify-send` (libnotify).
    NotifySend,
    /// AppleScript via `osascript`.
    Osascript,
    /// Never notify.
    #[serde(rename = "none")]
    Disabled,
}

impl Default for NotifierBackend {
    fn default() -> Self {
        if cfg!(target_os = "macos") {
            Self::TerminalNotifier
        } else {
            Self::NotifySend
        }
    }
}

impl NotifierBackend {
    /// Builds the argv for a notification, or `None` when disabled.
    pub fn command_line(&self, notification: &Notification) -> Option<Vec<String>> {
        let argv = match self {
            Self::TerminalNotifier => vec![
                "terminal-notifier".to_string(),
                "-message".to_string(),
                notification.message.clone(),
                "-title".to_string(),
                notification.title.clone(),
                "-sound".to_string(),
                notification.sound.name().to_string(),
            ],
            Self::NotifySend => vec![
                "notify-send".to_string(),
                "--urgency".to_string(),
                notification.sound.urgency().to_string(),
                "--app-name".to_string(),
                APP_NAME.to_string(),
                notification.title.clone(),
                notification.message.clone(),
            ],
            Self::Osascript => vec![
                "osascript".to_string(),
                "-e".to_string(),
                format!(
                    "display notification \"{}\" with title \"{}\" sound name \"{}\"",
                    escape_applescript(&notification.message),
                    escape_applescript(&notification.title),
                    notification.sound.name(),
                ),
            ],
            Self::Disabled => return None,
        };
        Some(argv)
    }
}

// Quotes would end the AppleScript string literal early.
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', " ")
}

// ============================================================================
// Notifier
// ============================================================================

/// Delivers desktop notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Shows one notification.
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that shells out to a [`NotifierBackend`] command.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    backend: NotifierBackend,
    process: Arc<ProcessRunner>,
}

impl CommandNotifier {
    /// Creates a notifier for the given backend.
    pub fn new(backend: NotifierBackend, process: Arc<ProcessRunner>) -> Self {
        Self { backend, process }
    }

    /// Returns the configured backend.
    pub fn backend(&self) -> NotifierBackend {
        self.backend
    }
}

#[async_trait]
impl Notifier for CommandNotifier {
    #[instrument(skip(self, notification), fields(backend = ?self.backend, sound = notification.sound.name()))]
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let Some(argv) = self.backend.command_line(notification) else {
            return Err(NotifyError::Disabled);
        };

        self.process.run_argv(&argv).await?.into_stdout()?;
        debug!(message = %notification.message, "Notification sent");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
