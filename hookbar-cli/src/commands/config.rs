//! Config command - show or initialize configuration.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Args};
use hookbar_store::{Settings, default_config_dir};
use serde::Serialize;
use tracing::info;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the config command. `--show` is the default.
#[derive(Args, Default)]
#[command(group(ArgGroup::new("action").args(["path", "show", "init"])))]
pub struct ConfigArgs {
    /// Show configuration paths.
    #[arg(long)]
    pub path: bool,

    /// Show the effective configuration.
    #[arg(long)]
    pub show: bool,

    /// Write a settings file with the default values.
    #[arg(long)]
    pub init: bool,

    /// With --init, overwrite an existing settings file.
    #[arg(long, requires = "init")]
    pub force: bool,
}

#[derive(Serialize)]
struct PathsOutput {
    config_dir: String,
    settings_file: String,
    status_file: String,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    if args.show || !(args.path || args.init) {
        show_config(cli).await
    } else if args.path {
        show_paths(cli).await
    } else {
        init_config(args.force, cli).await
    }
}

async fn show_config(cli: &Cli) -> Result<()> {
    let settings = super::load_settings(cli).await;

    match cli.format {
        OutputFormat::Text => print!("{}", TextFormatter::format_settings(&settings)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&settings)?),
    }

    Ok(())
}

async fn show_paths(cli: &Cli) -> Result<()> {
    let settings = super::load_settings(cli).await;
    let paths = PathsOutput {
        config_dir: default_config_dir().display().to_string(),
        settings_file: super::settings_path(cli).display().to_string(),
        status_file: settings.status_file.display().to_string(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Config directory: {}", paths.config_dir);
            println!("Settings file:    {}", paths.settings_file);
            println!("Status file:      {}", paths.status_file);
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?),
    }

    Ok(())
}

async fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = super::settings_path(cli);
    write_defaults(&path, force).await?;
    info!(path = %path.display(), "Settings initialized");

    if !cli.quiet {
        println!("Wrote default settings to {}", path.display());
    }
    Ok(())
}

async fn write_defaults(path: &Path, force: bool) -> Result<()> {
    if !force && tokio::fs::try_exists(path).await.unwrap_or(false) {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Settings::default()
        .save(path)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}
