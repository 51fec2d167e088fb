//! JSON output formatting.

use anyhow::Result;
use hookbar_core::{StatusLine, UsageSnapshot};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// One provider's answer to a usage query.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub provider: String,
    pub adapter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UsageReport {
    /// Builds a report from a fetch result.
    pub fn new(
        provider: impl Into<String>,
        adapter: impl Into<String>,
        result: Result<UsageSnapshot, String>,
    ) -> Self {
        let (cost_usd, tokens, error) = match result {
            Ok(snapshot) => (Some(snapshot.cost), Some(snapshot.tokens), None),
            Err(e) => (None, None, Some(e)),
        };
        Self {
            provider: provider.into(),
            adapter: adapter.into(),
            cost_usd,
            tokens,
            error,
        }
    }
}

/// The status line as structured data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    provider: Option<String>,
    model: Option<String>,
    requests: u64,
    tokens: u64,
    cost_usd: f64,
    line: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a status line with its fields and rendered text.
    pub fn format_status(&self, status: &StatusLine) -> Result<String> {
        self.format(&StatusOutput {
            provider: status.provider.clone(),
            model: status.model.clone(),
            requests: status.requests,
            tokens: status.tokens,
            cost_usd: status.cost,
            line: status.render(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let data = serde_json::json!({"key": "value"});
        let output = formatter.format(&data).unwrap();
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_usage_report_skips_missing_fields() {
        let ok = UsageReport::new("anthropic", "anthropic.cli", Ok(UsageSnapshot::new(3.5, 17)));
        let failed = UsageReport::new("openai", "openai.api", Err("missing key".into()));

        let formatter = JsonFormatter::new(false);
        assert_eq!(
            formatter.format(&ok).unwrap(),
            r#"{"provider":"anthropic","adapter":"anthropic.cli","costUsd":3.5,"tokens":17}"#
        );
        assert_eq!(
            formatter.format(&failed).unwrap(),
            r#"{"provider":"openai","adapter":"openai.api","error":"missing key"}"#
        );
    }

    #[test]
    fn test_format_status_includes_rendered_line() {
        let status = StatusLine {
            provider: Some("anthropic".into()),
            model: Some("anthropic/claude-sonnet-4".into()),
            requests: 2,
            tokens: 17,
            cost: 3.5,
        };

        let output = JsonFormatter::new(false).format_status(&status).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["requests"], 2);
        assert_eq!(value["costUsd"], 3.5);
        assert_eq!(
            value["line"],
            "📊 anthropic | anthropic/claude-sonnet-4 | Requests: 2 | Tokens: 17 | Cost: $3.5000"
        );
    }
}
