//! Dispatch command - handle a single hook message.

use anyhow::{Context, Result};
use clap::Args;
use hookbar_core::HookMessage;
use hookbar_hooks::HookHost;
use tokio::io::AsyncReadExt;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the dispatch command.
#[derive(Args)]
pub struct DispatchArgs {
    /// The hook message as JSON. Reads stdin when omitted or "-".
    pub message: Option<String>,
}

/// Runs the dispatch command.
///
/// The host starts from fresh state, so session counters only reflect this
/// one message.
pub async fn run(args: &DispatchArgs, cli: &Cli) -> Result<()> {
    let raw = match args.message.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read hook message from stdin")?;
            buf
        }
        Some(message) => message.to_string(),
    };

    let message = parse_message(&raw)?;

    let settings = super::load_settings(cli).await;
    let mut host = HookHost::from_settings(&settings);
    host.handle(&message).await;

    let line = host.aggregator().status_line();
    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format_status(&line)?);
        }
    }

    Ok(())
}

fn parse_message(raw: &str) -> Result<HookMessage> {
    Ok(HookMessage::from_json(raw)?)
}
