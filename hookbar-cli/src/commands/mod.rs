//! CLI command implementations.

pub mod config;
pub mod dispatch;
pub mod listen;
pub mod status;
pub mod usage;

use std::path::PathBuf;

use hookbar_store::{Settings, default_settings_path};

use crate::Cli;

/// Returns the settings path chosen on the command line, or the default.
pub fn settings_path(cli: &Cli) -> PathBuf {
    cli.settings.clone().unwrap_or_else(default_settings_path)
}

/// Loads settings for a command.
///
/// A missing file yields defaults. An unreadable or invalid file is reported
/// and also yields defaults, so the hooks keep running.
pub async fn load_settings(cli: &Cli) -> Settings {
    Settings::load_or_default(&settings_path(cli)).await
}
