//! Status line publishing.
//!
//! A rendered [`StatusLine`] goes to one or more [`StatusSink`]s: the status
//! file other tools poll, and the terminal title.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use hookbar_core::{DegradeSource, StatusLine};
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::persistence::write_text;

// ============================================================================
// Sink Trait
// ============================================================================

/// Somewhere a status line is published.
#[async_trait]
pub trait StatusSink: Send + Sync {
    /// Which degrade source failures of this sink report as.
    fn source(&self) -> DegradeSource;

    /// Publishes the line, replacing whatever was shown before.
    async fn publish(&self, line: &StatusLine) -> Result<(), StoreError>;
}

// ============================================================================
// Status File
// ============================================================================

/// Single-line status file, fully overwritten on every publish.
#[derive(Debug, Clone)]
pub struct StatusFile {
    path: PathBuf,
}

impl StatusFile {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current status line, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read.
    pub async fn read(&self) -> Result<String, StoreError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        Ok(content.trim_end_matches('\n').to_string())
    }
}

#[async_trait]
impl StatusSink for StatusFile {
    fn source(&self) -> DegradeSource {
        DegradeSource::StatusFile
    }

    #[instrument(skip(self, line), fields(path = %self.path.display()))]
    async fn publish(&self, line: &StatusLine) -> Result<(), StoreError> {
        write_text(&self.path, &format!("{line}\n")).await
    }
}

// ============================================================================
// Terminal Title
// ============================================================================

/// Sets the terminal title with an OSC 0 escape sequence.
pub struct TerminalTitle {
    prefix: String,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalTitle {
    /// Writes to this process's stdout.
    pub fn stdout(prefix: impl Into<String>) -> Self {
        Self::with_writer(prefix, Box::new(std::io::stdout()))
    }

    /// Writes to an arbitrary writer.
    pub fn with_writer(prefix: impl Into<String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            prefix: prefix.into(),
            out: Mutex::new(out),
        }
    }

    /// Returns the escape sequence for a title.
    pub fn escape(&self, line: &StatusLine) -> String {
        format!("\x1b]0;{}{line}\x07", self.prefix)
    }
}

impl std::fmt::Debug for TerminalTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalTitle")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl StatusSink for TerminalTitle {
    fn source(&self) -> DegradeSource {
        DegradeSource::TerminalTitle
    }

    async fn publish(&self, line: &StatusLine) -> Result<(), StoreError> {
        let escape = self.escape(line);
        let mut out = self
            .out
            .lock()
            .map_err(|_| std::io::Error::other("terminal writer poisoned"))?;
        out.write_all(escape.as_bytes())?;
        out.flush()?;
        debug!("Terminal title updated");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
