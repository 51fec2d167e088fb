//! Text output formatting.

use std::fmt::Write;

use hookbar_core::format_cost;
use hookbar_store::Settings;

use super::UsageReport;

/// Human-readable formatter.
pub struct TextFormatter;

impl TextFormatter {
    /// Formats usage reports, one line per provider.
    pub fn format_usage(reports: &[UsageReport]) -> String {
        let mut out = String::new();
        for report in reports {
            let _ = match (&report.error, report.cost_usd, report.tokens) {
                (Some(e), _, _) => writeln!(out, "{:<10} ✗ {e}", report.provider),
                (None, cost, tokens) => writeln!(
                    out,
                    "{:<10} ${}  {} tokens  ({})",
                    report.provider,
                    format_cost(cost.unwrap_or(0.0)),
                    tokens.unwrap_or(0),
                    report.adapter
                ),
            };
        }
        out
    }

    /// Formats the effective settings.
    pub fn format_settings(settings: &Settings) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "hookbar Configuration");
        let _ = writeln!(out, "{}", "─".repeat(40));
        let _ = writeln!(out);
        let _ = writeln!(out, "Notifications:");
        let _ = writeln!(out, "  Backend: {:?}", settings.notifier);
        let _ = writeln!(out, "  Title: {}", settings.notification_title);
        let _ = writeln!(out, "  Summary title: {}", settings.summary_title);
        let _ = writeln!(out, "  Idle threshold: {} ms", settings.idle_threshold_ms);
        let _ = writeln!(
            out,
            "  Long command threshold: {} ms",
            settings.long_command_threshold_ms
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Status:");
        let _ = writeln!(out, "  File: {}", settings.status_file.display());
        let _ = writeln!(
            out,
            "  Terminal title: {}",
            if settings.terminal_title {
                format!("on (prefix \"{}\")", settings.title_prefix)
            } else {
                "off".to_string()
            }
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "Providers:");
        let _ = writeln!(out, "  anthropic: {}", settings.usage_command.join(" "));
        let _ = writeln!(
            out,
            "  openai: {} (key from ${})",
            settings.openai_base_url, settings.openai_api_key_env
        );
        let _ = writeln!(
            out,
            "  Timeouts: command {}s, http {}s",
            settings.command_timeout_secs, settings.http_timeout_secs
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookbar_core::UsageSnapshot;

    #[test]
    fn test_format_usage_lines() {
        let reports = [
            UsageReport::new("anthropic", "anthropic.cli", Ok(UsageSnapshot::new(3.5, 17))),
            UsageReport::new("openai", "openai.api", Err("missing API key".into())),
        ];

        let text = TextFormatter::format_usage(&reports);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "anthropic  $3.5000  17 tokens  (anthropic.cli)");
        assert_eq!(lines[1], "openai     ✗ missing API key");
    }

    #[test]
    fn test_format_settings_mentions_paths_and_thresholds() {
        let settings = Settings::default();
        let text = TextFormatter::format_settings(&settings);

        assert!(text.contains("Idle threshold: 10000 ms"));
        assert!(text.contains("Long command threshold: 5000 ms"));
        assert!(text.contains(&settings.status_file.display().to_string()));
        assert!(text.contains("ccusage session --json --today"));
    }
}
