//! OpenAI provider.
//!
//! Usage comes from `GET https://api.openai.com/v1/usage?date=<today>` with a
//! bearer API key. The endpoint reports cost and request counts per bucket;
//! requests are shown in the token column.

pub(crate) mod api;
mod adapter;
mod credentials;

pub use adapter::OpenAiAdapter;
pub use api::{DEFAULT_BASE_URL, UsageBucket, UsageResponse, parse_usage_response, usage_url};
pub use credentials::{ApiKeySource, DEFAULT_API_KEY_ENV, load_from_env, load_from_shell};
