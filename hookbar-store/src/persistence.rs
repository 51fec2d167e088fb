//! File persistence helpers.
//!
//! Every write goes through a temp file followed by a rename, so readers of
//! the status file or the settings never see a half-written file.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the root configuration directory shared with opencode.
///
/// - macOS: `~/.config`
/// - Linux: `$XDG_CONFIG_HOME` or `~/.config`
/// - Windows: `%APPDATA%`
pub fn config_root() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| h.join(".config"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns hookbar's own configuration directory.
pub fn default_config_dir() -> PathBuf {
    config_root().join("hookbar")
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

/// Returns the default status file path, the one opencode status bars read.
pub fn default_status_path() -> PathBuf {
    config_root().join("opencode").join("status.txt")
}

// ============================================================================
// File Operations
// ============================================================================

/// Creates the parent directory of `path` if it is missing.
async fn create_parent_dirs(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !tokio::fs::try_exists(parent).await.unwrap_or(false) {
            debug!(path = %parent.display(), "Creating directory");
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Writes text atomically (temp file + rename), creating parent directories.
pub async fn write_text(path: &Path, contents: &str) -> Result<(), StoreError> {
    create_parent_dirs(path).await?;

    let mut temp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    tokio::fs::write(&temp_path, contents).await?;
    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    debug!(path = %path.display(), bytes = contents.len(), "File written");
    Ok(())
}

/// Saves data to a pretty-printed JSON file.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");
    let json = serde_json::to_string_pretty(data)?;
    write_text(path, &json).await
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Loads data from a JSON file, returning default if not found or invalid.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) => {
            if !e.is_not_found() {
                warn!(path = %path.display(), error = %e, "Failed to load, using defaults");
            }
            T::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
