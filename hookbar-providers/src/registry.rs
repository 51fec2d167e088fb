//! Adapter registry.
//!
//! The registry is the dispatch table from provider id to usage adapter.
//! Lookups never fail: unknown providers, and sessions with no provider yet,
//! get the [`NullAdapter`].

use hookbar_core::ProviderKind;
use hookbar_fetch::UsageAdapter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::anthropic::AnthropicAdapter;
use crate::null::NullAdapter;
use crate::openai::OpenAiAdapter;

// ============================================================================
// Adapter Registry
// ============================================================================

/// Maps provider ids to usage adapters.
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn UsageAdapter>>,
    fallback: Arc<dyn UsageAdapter>,
}

impl AdapterRegistry {
    /// Creates an empty registry; every lookup yields the null adapter.
    pub fn empty() -> Self {
        Self {
            adapters: HashMap::new(),
            fallback: Arc::new(NullAdapter),
        }
    }

    /// Creates the standard registry with the given built-in adapters.
    pub fn standard(anthropic: AnthropicAdapter, openai: OpenAiAdapter) -> Self {
        Self::empty()
            .with(ProviderKind::Anthropic.id(), anthropic)
            .with(ProviderKind::OpenAI.id(), openai)
    }

    /// Registers an adapter, builder style.
    pub fn with(mut self, provider: &str, adapter: impl UsageAdapter + 'static) -> Self {
        self.register(provider, Arc::new(adapter));
        self
    }

    /// Registers an adapter, replacing any previous one for `provider`.
    pub fn register(&mut self, provider: &str, adapter: Arc<dyn UsageAdapter>) {
        debug!(provider = %provider, adapter = %adapter.id(), "Registering adapter");
        self.adapters.insert(provider.to_string(), adapter);
    }

    /// Returns the adapter for a provider. Matching is exact.
    pub fn get(&self, provider: Option<&str>) -> Arc<dyn UsageAdapter> {
        provider
            .and_then(|p| self.adapters.get(p))
            .unwrap_or(&self.fallback)
            .clone()
    }

    /// Returns true if `provider` has a dedicated adapter.
    pub fn contains(&self, provider: &str) -> bool {
        self.adapters.contains_key(provider)
    }

    /// Returns the registered provider ids, sorted.
    pub fn providers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns the number of registered adapters.
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if no adapters are registered.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::standard(AnthropicAdapter::new(), OpenAiAdapter::new())
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("providers", &self.providers())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
