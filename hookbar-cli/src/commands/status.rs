//! Status command - print the last published status line.

use anyhow::{Result, bail};
use hookbar_store::StatusFile;
use serde::Serialize;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

#[derive(Serialize)]
struct StatusOutput {
    path: String,
    status: Option<String>,
}

/// Runs the status command.
pub async fn run(cli: &Cli) -> Result<()> {
    let settings = super::load_settings(cli).await;
    let file = StatusFile::new(settings.status_file);

    let status = match file.read().await {
        Ok(line) => Some(line),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e.into()),
    };

    match cli.format {
        OutputFormat::Text => match status {
            Some(line) => println!("{line}"),
            None => bail!(
                "no status published yet at {} (run the hooks first)",
                file.path().display()
            ),
        },
        OutputFormat::Json => {
            let output = StatusOutput {
                path: file.path().display().to_string(),
                status,
            };
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }

    Ok(())
}
