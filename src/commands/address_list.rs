//! Address-list command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

use super::{emit, load_domains};
use crate::config::{Config, ResolverKind};
use crate::render::AddressListScript;
use crate::resolver::{create_resolver, resolve_all, DomainResolver};
use crate::utils::format_count;

/// Run the address-list command
pub async fn run(
    config: &Config,
    output: Option<&Path>,
    resolver_kind: Option<ResolverKind>,
    dry_run: bool,
) -> Result<()> {
    let mut resolver_config = config.resolver.clone();
    if let Some(kind) = resolver_kind {
        resolver_config.kind = kind;
    }
    resolver_config.validate()?;

    let resolver = create_resolver(&resolver_config)
        .with_context(|| format!("Failed to create {} resolver", resolver_config.kind))?;

    run_with_resolver(config, resolver.as_ref(), output, dry_run).await
}

/// Fetch, resolve and render using an already constructed resolver
pub async fn run_with_resolver(
    config: &Config,
    resolver: &dyn DomainResolver,
    output: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let domains = load_domains(config).await?;

    let resolved = resolve_all(
        resolver,
        &domains,
        config.resolver.concurrency,
        config.resolver.task_timeout(),
    )
    .await;

    let address_count = resolved.address_count();
    info!(
        "Resolved {} of {} domains to {} unique addresses",
        format_count(resolved.resolved_domain_count()),
        format_count(domains.len()),
        format_count(address_count)
    );
    if address_count == 0 {
        warn!("No domain resolved; the list will only clear {}", config.address_list.list_name);
    }

    let script = AddressListScript {
        source_url: &config.source_url,
        list_name: &config.address_list.list_name,
        comment_prefix: &config.address_list.comment_prefix,
        generated_at: Utc::now(),
    }
    .render(resolved.entries());

    let path = output.unwrap_or(config.address_list.output.as_path());
    emit(&script, path, address_count, dry_run)
}
