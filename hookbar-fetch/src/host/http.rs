//! HTTP client with tracing.
//!
//! A thin wrapper around `reqwest` that fixes the user agent and timeout and
//! logs every request at debug level.

use reqwest::{Client, Response, header};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for hookbar.
const USER_AGENT: &str = concat!("hookbar/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// If the configured client cannot be built, falls back to reqwest's
    /// default client rather than failing the hook.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client, using defaults");
                Client::new()
            });

        Self { inner: client }
    }

    /// Performs a GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &Url) -> Result<Response, HttpError> {
        debug!("GET request");

        let response = self.inner.get(url.clone()).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with a bearer token.
    #[instrument(skip(self, token), fields(url = %url))]
    pub async fn get_with_bearer(&self, url: &Url, token: &str) -> Result<Response, HttpError> {
        debug!("GET request with auth");

        let response = self
            .inner
            .get(url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Returns the inner reqwest client for advanced operations.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a URL, mapping failures to [`HttpError::InvalidUrl`].
pub fn parse_url(raw: &str) -> Result<Url, HttpError> {
    Url::parse(raw).map_err(|e| HttpError::InvalidUrl(format!("{raw}: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
