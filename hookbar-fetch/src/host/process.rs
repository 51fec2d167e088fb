//! Subprocess execution.
//!
//! Every external program hookbar touches goes through [`ProcessRunner`]:
//! the usage-report command, the notifier, and the login shell used to look
//! up credentials.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::ProcessError;

/// Default command timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Process Output
// ============================================================================

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output content.
    pub stdout: String,
    /// Standard error content.
    pub stderr: String,
    /// Exit code (0 = success).
    pub exit_code: i32,
    /// How long the command took to execute.
    pub duration: Duration,
}

impl ProcessOutput {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Consumes the output, returning stdout if the command succeeded.
    pub fn into_stdout(self) -> Result<String, ProcessError> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(ProcessError::NonZeroExit {
                code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

// ============================================================================
// Process Runner
// ============================================================================

/// Runs external commands with a timeout.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    /// Creates a runner with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a runner with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Returns the timeout applied to every command.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs a program with arguments and captures its output.
    ///
    /// The program is resolved on `PATH` first, so a missing program is
    /// reported as [`ProcessError::NotFound`] rather than an IO error. Stdin
    /// is closed and the child is killed if the timeout elapses.
    #[instrument(skip(self), fields(cmd = %cmd))]
    pub async fn run(&self, cmd: &str, args: &[&str]) -> Result<ProcessOutput, ProcessError> {
        let Some(program) = resolve(cmd) else {
            warn!("Command not found");
            return Err(ProcessError::NotFound(cmd.to_string()));
        };
        debug!(program = %program.display(), args = ?args, "Spawning");

        let started = Instant::now();
        let mut command = Command::new(&program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let Ok(output) = tokio::time::timeout(self.timeout, command.output()).await else {
            warn!(timeout = ?self.timeout, "Command timed out");
            return Err(ProcessError::Timeout(self.timeout));
        };
        let output = output?;

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: started.elapsed(),
        };
        debug!(
            exit_code = result.exit_code,
            duration = ?result.duration,
            stdout_len = result.stdout.len(),
            "Command finished"
        );
        Ok(result)
    }

    /// Runs a command and returns its stdout, failing on a non-zero exit.
    pub async fn run_for_stdout(&self, cmd: &str, args: &[&str]) -> Result<String, ProcessError> {
        self.run(cmd, args).await?.into_stdout()
    }

    /// Runs a configured argument vector, program first.
    pub async fn run_argv(&self, argv: &[String]) -> Result<ProcessOutput, ProcessError> {
        let (cmd, rest) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.run(cmd, &args).await
    }
}

/// Resolves a program name on `PATH`. Paths are checked as given.
fn resolve(cmd: &str) -> Option<PathBuf> {
    which::which(cmd).ok()
}

// ============================================================================
// Tests
// ============================================================================
