// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # hookbar Providers
//!
//! Usage adapters for the providers hookbar knows about.
//!
//! | Provider | Adapter | Source |
//! |----------|---------|--------|
//! | Anthropic | [`AnthropicAdapter`] | `ccusage session --json --today` |
//! | OpenAI | [`OpenAiAdapter`] | `GET /v1/usage?date=<today>` |
//! | anything else | [`NullAdapter`] | none, always zero |
//!
//! ## Usage
//!
//! ```ignore
//! use hookbar_providers::AdapterRegistry;
//! use hookbar_fetch::FetchContext;
//!
//! let registry = AdapterRegistry::default();
//! let ctx = FetchContext::new();
//! let snapshot = registry.get(Some("anthropic")).fetch_usage(&ctx).await?;
//! ```

pub mod anthropic;
pub mod error;
pub mod null;
pub mod openai;
pub mod registry;

pub use anthropic::AnthropicAdapter;
pub use error::ProviderError;
pub use null::NullAdapter;
pub use openai::{ApiKeySource, OpenAiAdapter};
pub use registry::AdapterRegistry;
