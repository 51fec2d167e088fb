//! OpenAI API key lookup.
//!
//! Sources, in order:
//!
//! 1. **Environment** - the configured variable (`OPENAI_API_KEY` by default)
//! 2. **Login shell** - `$SHELL -lc` (or `sh -c`) echoing the same variable,
//!    which picks up keys exported from shell profiles the hook host never
//!    sourced

use hookbar_fetch::ProcessRunner;
use tracing::{debug, instrument};

use crate::error::ProviderError;

/// Default environment variable holding the key.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Shell used when `$SHELL` is unset or fails.
const FALLBACK_SHELL: &str = "sh";

// ============================================================================
// Key Source
// ============================================================================

/// Where the adapter gets its API key from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    /// Look the key up by environment variable name.
    Env(String),
    /// Use a fixed key.
    Fixed(String),
}

impl Default for ApiKeySource {
    fn default() -> Self {
        Self::Env(DEFAULT_API_KEY_ENV.to_string())
    }
}

impl ApiKeySource {
    /// Resolves the key. An empty key counts as missing.
    #[instrument(skip(self, process))]
    pub async fn resolve(&self, process: &ProcessRunner) -> Result<String, ProviderError> {
        match self {
            Self::Fixed(key) if !key.is_empty() => Ok(key.clone()),
            Self::Fixed(_) => Err(ProviderError::MissingApiKey("<fixed>".to_string())),
            Self::Env(var) => {
                if let Some(key) = load_from_env(var) {
                    debug!(source = "env", "Loaded OpenAI key");
                    return Ok(key);
                }
                if let Some(key) = load_from_shell(process, var).await {
                    debug!(source = "shell", "Loaded OpenAI key");
                    return Ok(key);
                }
                Err(ProviderError::MissingApiKey(var.clone()))
            }
        }
    }
}

// ============================================================================
// Lookups
// ============================================================================

/// Reads the key from this process's environment.
pub fn load_from_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Asks the user's shell to print the variable.
///
/// Only plain identifiers are expanded; anything else is never handed to a
/// shell.
pub async fn load_from_shell(process: &ProcessRunner, var: &str) -> Option<String> {
    if !is_identifier(var) {
        debug!(var = %var, "Refusing shell lookup for non-identifier");
        return None;
    }

    let script = format!("printf '%s' \"${var}\"");

    if let Some(shell) = std::env::var("SHELL").ok().filter(|s| !s.is_empty()) {
        if let Ok(stdout) = process.run_for_stdout(&shell, &["-lc", &script]).await {
            return non_empty(&stdout);
        }
    }

    process
        .run_for_stdout(FALLBACK_SHELL, &["-c", &script])
        .await
        .ok()
        .and_then(|stdout| non_empty(&stdout))
}

fn non_empty(stdout: &str) -> Option<String> {
    let value = stdout.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn is_identifier(var: &str) -> bool {
    let mut chars = var.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
