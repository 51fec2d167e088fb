//! Provider-related types.
//!
//! The provider is never configured directly: it is derived from the model
//! identifier reported by the agent (`anthropic/claude-sonnet-4` →
//! `anthropic`). [`ProviderKind`] names the providers that have a dedicated
//! usage adapter; every other provider string falls through to the null
//! adapter.

use serde::{Deserialize, Serialize};

/// Separator between the provider and the model name in a model identifier.
pub const MODEL_SEPARATOR: char = '/';

// ============================================================================
// Provider Kind
// ============================================================================

/// Providers with a dedicated usage adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic, usage read from the local usage-report command.
    Anthropic,
    /// OpenAI, usage read from the remote usage API.
    OpenAI,
}

impl ProviderKind {
    /// Returns the provider id as it appears in model identifiers.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAI => "openai",
        }
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Derives the provider from a model identifier.
///
/// Returns the substring before the first [`MODEL_SEPARATOR`], or the whole
/// identifier when there is no separator. An empty identifier has no provider.
pub fn provider_from_model(model: &str) -> Option<String> {
    if model.is_empty() {
        return None;
    }
    let provider = model.split(MODEL_SEPARATOR).next().unwrap_or(model);
    Some(provider.to_string())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_model() {
        assert_eq!(
            provider_from_model("anthropic/claude-sonnet-4").as_deref(),
            Some("anthropic")
        );
        assert_eq!(provider_from_model("openai/gpt-4o").as_deref(), Some("openai"));
        assert_eq!(
            provider_from_model("openrouter/anthropic/claude").as_deref(),
            Some("openrouter")
        );
    }

    #[test]
    fn test_provider_without_separator() {
        assert_eq!(provider_from_model("gpt-4o").as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn test_provider_from_empty_model() {
        assert_eq!(provider_from_model(""), None);
    }

    #[test]
    fn test_leading_separator_yields_empty_provider() {
        assert_eq!(provider_from_model("/claude").as_deref(), Some(""));
    }

    #[test]
    fn test_kind_ids_match_model_prefixes() {
        assert_eq!(
            provider_from_model("anthropic/claude-sonnet-4").as_deref(),
            Some(ProviderKind::Anthropic.id())
        );
        assert_eq!(
            provider_from_model("openai/gpt-4o").as_deref(),
            Some(ProviderKind::OpenAI.id())
        );
    }
}
