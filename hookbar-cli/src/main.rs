// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! hookbar CLI - hosts the agent hooks from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Feed hook messages as JSON lines until EOF
//! agent --emit-hooks | hookbar listen
//!
//! # Handle a single message
//! hookbar dispatch '{"hook":"event","event":{"type":"session.idle"}}'
//!
//! # Print the last published status line
//! hookbar status
//!
//! # Query one provider's usage for today
//! hookbar usage --provider anthropic --format json
//!
//! # Write a default settings file
//! hookbar config --init
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, dispatch, listen, status, usage};

// ============================================================================
// CLI Definition
// ============================================================================

/// hookbar CLI - notifications and a usage status line for agent sessions.
#[derive(Parser)]
#[command(name = "hookbar")]
#[command(about = "Desktop notifications and a usage status line for agent sessions")]
#[command(long_about = r#"
hookbar reacts to agent lifecycle events and tool calls. It sends desktop
notifications for approvals, errors, file edits and long commands, and keeps
a one-line usage summary (provider, model, requests, tokens, cost) in a
status file and the terminal title.

Hook messages are JSON objects tagged by "hook":
  {"hook":"event","event":{"type":"session.idle"}}
  {"hook":"tool.execute.before","input":{"tool":"bash","context":{"model":"anthropic/claude-sonnet-4"}}}
  {"hook":"tool.execute.after","input":{"tool":"bash"},"output":{"duration":6000}}

Examples:
  hookbar listen                 # Read JSON lines from stdin
  hookbar dispatch '<json>'      # Handle one message
  hookbar status                 # Show the status line
  hookbar config --path          # Show configuration paths
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'listen'.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Settings file to use instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no logging, errors only through the exit code).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Read hook messages as JSON lines from stdin until EOF (default).
    #[command(visible_alias = "l")]
    Listen,

    /// Handle a single hook message.
    #[command(visible_alias = "d")]
    Dispatch(dispatch::DispatchArgs),

    /// Print the last published status line.
    #[command(visible_alias = "s")]
    Status,

    /// Fetch today's usage from one provider's adapter.
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Show or initialize configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Input was not a hook message.
    ParseError = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("hookbar=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hookbar=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Listen) | None => listen::run(&cli).await,
        Some(Commands::Dispatch(args)) => dispatch::run(args, &cli).await,
        Some(Commands::Status) => status::run(&cli).await,
        Some(Commands::Usage(args)) => usage::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        let code = if e.is::<hookbar_core::CoreError>() {
            ExitCode::ParseError
        } else {
            ExitCode::Error
        };
        std::process::exit(code as i32);
    }

    Ok(())
}
