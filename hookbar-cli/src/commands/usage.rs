//! Usage command - query provider adapters directly.

use anyhow::{Result, bail};
use clap::Args;
use hookbar_fetch::FetchContext;
use hookbar_hooks::registry_from_settings;
use hookbar_providers::AdapterRegistry;
use tracing::{info, warn};

use crate::output::{JsonFormatter, TextFormatter, UsageReport};
use crate::{Cli, OutputFormat};

/// Arguments for the usage command.
#[derive(Args, Default)]
pub struct UsageArgs {
    /// Provider to query ("anthropic", "openai"). Queries all when omitted.
    #[arg(long, short)]
    pub provider: Option<String>,
}

/// Runs the usage command.
///
/// Nothing is published: this only shows what a refresh would see.
pub async fn run(args: &UsageArgs, cli: &Cli) -> Result<()> {
    let settings = super::load_settings(cli).await;
    let registry = registry_from_settings(&settings);
    let providers = select_providers(&registry, args.provider.as_deref())?;

    info!(providers = ?providers, "Fetching usage");

    let ctx = FetchContext::with_settings(settings.fetch_settings());
    let mut reports = Vec::with_capacity(providers.len());
    for provider in providers {
        let adapter = registry.get(Some(provider.as_str()));
        let result = adapter.fetch_usage(&ctx).await.map_err(|e| {
            warn!(provider = %provider, adapter = %adapter.id(), error = %e, "Fetch failed");
            e.to_string()
        });
        reports.push(UsageReport::new(provider, adapter.id(), result));
    }

    match cli.format {
        OutputFormat::Text => print!("{}", TextFormatter::format_usage(&reports)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&reports)?),
    }

    if reports.iter().all(|r| r.error.is_some()) {
        bail!("no provider returned usage");
    }

    Ok(())
}

fn select_providers(registry: &AdapterRegistry, provider: Option<&str>) -> Result<Vec<String>> {
    match provider {
        Some(name) if registry.contains(name) => Ok(vec![name.to_string()]),
        Some(name) => bail!(
            "Unknown provider: {name} (known: {})",
            registry.providers().join(", ")
        ),
        None => Ok(registry.providers().into_iter().map(str::to_string).collect()),
    }
}
