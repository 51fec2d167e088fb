//! Anthropic usage via the local usage-report command.

use async_trait::async_trait;
use hookbar_core::UsageSnapshot;
use hookbar_fetch::{AdapterKind, FetchContext, FetchError, UsageAdapter};
use tracing::{debug, instrument};

use super::parser::parse_session_report;

/// Default usage-report command.
pub const DEFAULT_USAGE_COMMAND: &[&str] = &["ccusage", "session", "--json", "--today"];

/// Reads today's Anthropic usage by running a usage-report command.
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    command: Vec<String>,
}

impl AnthropicAdapter {
    /// Creates an adapter running the default `ccusage` command.
    pub fn new() -> Self {
        Self::with_command(DEFAULT_USAGE_COMMAND.iter().map(ToString::to_string).collect())
    }

    /// Creates an adapter running a custom argv (program first).
    pub fn with_command(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Returns the argv this adapter runs.
    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl Default for AnthropicAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageAdapter for AnthropicAdapter {
    fn id(&self) -> &str {
        "anthropic.cli"
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::CLI
    }

    #[instrument(skip(self, ctx), fields(command = ?self.command))]
    async fn fetch_usage(&self, ctx: &FetchContext) -> Result<UsageSnapshot, FetchError> {
        let stdout = ctx.process.run_argv(&self.command).await?.into_stdout()?;
        let snapshot = parse_session_report(&stdout)?;
        debug!(cost = snapshot.cost, tokens = snapshot.tokens, "Anthropic usage");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookbar_fetch::ProcessError;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_default_command() {
        let adapter = AnthropicAdapter::new();
        assert_eq!(adapter.command(), ["ccusage", "session", "--json", "--today"]);
        assert_eq!(adapter.id(), "anthropic.cli");
    }

    #[tokio::test]
    async fn test_fetch_from_command_output() {
        let adapter = AnthropicAdapter::with_command(argv(&[
            "echo",
            r#"[{"cost":1.5,"input_tokens":10,"output_tokens":5},{"cost":2.0,"input_tokens":1,"output_tokens":1}]"#,
        ]));

        let snapshot = adapter.fetch_usage(&FetchContext::new()).await.unwrap();
        assert!((snapshot.cost - 3.5).abs() < f64::EPSILON);
        assert_eq!(snapshot.tokens, 17);
    }

    #[tokio::test]
    async fn test_empty_output_is_zero() {
        let adapter = AnthropicAdapter::with_command(argv(&["true"]));
        let snapshot = adapter.fetch_usage(&FetchContext::new()).await.unwrap();
        assert!(snapshot.is_zero());
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let adapter = AnthropicAdapter::with_command(argv(&["false"]));
        let result = adapter.fetch_usage(&FetchContext::new()).await;
        assert!(matches!(
            result,
            Err(FetchError::Process(ProcessError::NonZeroExit { .. }))
        ));
    }

    #[tokio::test]
    async fn test_missing_command_is_error() {
        let adapter = AnthropicAdapter::with_command(argv(&["hookbar_no_such_report_cmd"]));
        let result = adapter.fetch_usage(&FetchContext::new()).await;
        assert!(matches!(
            result,
            Err(FetchError::Process(ProcessError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_malformed_output_is_error() {
        let adapter = AnthropicAdapter::with_command(argv(&["echo", "oops"]));
        let result = adapter.fetch_usage(&FetchContext::new()).await;
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }
}
