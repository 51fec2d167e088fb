//! Adapter for providers without a usage source.

use async_trait::async_trait;
use hookbar_core::UsageSnapshot;
use hookbar_fetch::{AdapterKind, FetchContext, FetchError, UsageAdapter};

/// Always reports zero usage without touching the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAdapter;

#[async_trait]
impl UsageAdapter for NullAdapter {
    fn id(&self) -> &str {
        "null"
    }

    fn kind(&self) -> AdapterKind {
        AdapterKind::Null
    }

    async fn fetch_usage(&self, _ctx: &FetchContext) -> Result<UsageSnapshot, FetchError> {
        Ok(UsageSnapshot::zero())
    }
}
