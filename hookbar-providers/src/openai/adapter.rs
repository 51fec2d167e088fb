//! OpenAI usage via the remote usage API.

use async_trait::async_trait;
use hookbar_core::UsageSnapshot;
use hookbar_fetch::{AdapterKind, FetchContext, FetchError, HttpError, UsageAdapter};
use tracing::{debug, instrument, warn};

use super::api::{DEFAULT_BASE_URL, parse_usage_response, usage_url};
use super::credentials::ApiKeySource;

/// Reads today's OpenAI usage from `GET /v1/usage`.
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    key: ApiKeySource,
    base_url: String,
}

impl OpenAiAdapter {
    /// Creates an adapter for `api.openai.com` reading `OPENAI_API_KEY`.
    pub fn new() -> Self {
        Self {
            key: ApiKeySource::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets where the API key comes from.
    pub fn with_key_source(mut self, key: ApiKeySource) -> Self {
        self.key = key;
        self
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OpenAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UsageAdapter for OpenAiAdapter {
    fn id(&self) -> &str {
        "openai.api"
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::ApiKey
    }

    #[instrument(skip(self, ctx))]
    async fn fetch_usage(&self, ctx: &FetchContext) -> Result<UsageSnapshot, FetchError> {
        let api_key = self.key.resolve(&ctx.process).await?;
        let url = usage_url(&self.base_url, ctx.today())?;

        let response = ctx.http.get_with_bearer(&url, &api_key).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "OpenAI usage request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(HttpError::from)?;
        let snapshot = parse_usage_response(&body)?;
        debug!(cost = snapshot.cost, requests = snapshot.tokens, "OpenAI usage");
        Ok(snapshot)
    }
}
