//! Provider-specific errors.

use hookbar_fetch::FetchError;
use thiserror::Error;

/// Errors raised while reading a provider's usage.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key in the environment or the login shell.
    #[error("No API key found in ${0}")]
    MissingApiKey(String),

    /// The usage report could not be interpreted.
    #[error("Invalid usage report: {0}")]
    InvalidReport(String),
}

impl From<ProviderError> for FetchError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::MissingApiKey(var) => FetchError::MissingCredential(var),
            ProviderError::InvalidReport(msg) => FetchError::InvalidResponse(msg),
        }
    }
}
