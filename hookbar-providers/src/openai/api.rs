//! OpenAI usage API types.

use chrono::NaiveDate;
use hookbar_core::UsageSnapshot;
use hookbar_fetch::{HttpError, host::http::parse_url};
use serde::Deserialize;
use url::Url;

use crate::error::ProviderError;

// ============================================================================
// Constants
// ============================================================================

/// OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Usage endpoint.
const USAGE_ENDPOINT: &str = "/v1/usage";

// ============================================================================
// API Response Types
// ============================================================================

/// Response from the usage endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct UsageResponse {
    /// Per-bucket usage; absent means no usage.
    #[serde(default)]
    pub total_usage: Option<Vec<UsageBucket>>,
}

/// One usage bucket.
#[derive(Debug, Default, Deserialize)]
pub struct UsageBucket {
    /// Cost in USD.
    #[serde(default)]
    pub cost: Option<f64>,
    /// Requests served.
    #[serde(default)]
    pub n_requests: Option<u64>,
}

impl UsageResponse {
    /// Converts to a snapshot. The API only reports request counts, so those
    /// stand in for tokens.
    pub fn to_snapshot(&self) -> UsageSnapshot {
        self.total_usage
            .iter()
            .flatten()
            .fold(UsageSnapshot::zero(), |acc, bucket| {
                UsageSnapshot::new(
                    acc.cost + bucket.cost.unwrap_or(0.0),
                    acc.tokens.saturating_add(bucket.n_requests.unwrap_or(0)),
                )
            })
    }
}

/// Parses a usage response body.
pub fn parse_usage_response(body: &str) -> Result<UsageSnapshot, ProviderError> {
    let response: UsageResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidReport(format!("usage response: {e}")))?;
    Ok(response.to_snapshot())
}

/// Builds `<base>/v1/usage?date=YYYY-MM-DD`.
pub fn usage_url(base_url: &str, date: NaiveDate) -> Result<Url, HttpError> {
    let mut url = parse_url(&format!(
        "{}{USAGE_ENDPOINT}",
        base_url.trim_end_matches('/')
    ))?;
    url.query_pairs_mut()
        .append_pair("date", &date.format("%Y-%m-%d").to_string());
    Ok(url)
}
