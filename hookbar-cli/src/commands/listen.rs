//! Listen command - host the hooks over a JSON-lines stream.

use anyhow::{Context, Result};
use hookbar_hooks::HookHost;
use serde::Serialize;
use tokio::io::BufReader;
use tracing::info;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

#[derive(Serialize)]
struct ListenSummary {
    handled: usize,
    skipped: usize,
}

/// Runs the listen command.
///
/// Messages are handled one at a time in arrival order until stdin closes.
pub async fn run(cli: &Cli) -> Result<()> {
    let settings = super::load_settings(cli).await;
    info!(status_file = %settings.status_file.display(), "Listening for hook messages");

    let mut host = HookHost::from_settings(&settings);
    let stats = host
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .context("failed to read hook messages from stdin")?;

    if cli.format == OutputFormat::Json {
        let summary = ListenSummary {
            handled: stats.handled,
            skipped: stats.skipped,
        };
        println!("{}", JsonFormatter::new(cli.pretty).format(&summary)?);
    }

    Ok(())
}
