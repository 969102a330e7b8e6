//! Domain resolution strategies (DoH, system resolver, named DNS server).
//!
//! Every strategy implements [`DomainResolver`], which never fails: any
//! transport, protocol or parsing error for a domain yields an empty
//! address list and a debug trace. [`resolve_all`] drives a resolver over
//! the whole domain set with bounded concurrency and merges the results
//! into an [`AddressAccumulator`].

mod accumulator;
mod doh;
mod nameserver;
mod system;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, info};

#[cfg(test)]
use mockall::automock;

pub use accumulator::{AddressAccumulator, DomainAddresses};
pub use doh::{parse_doh_response, DohResolver};
pub use nameserver::NameserverResolver;
pub use system::SystemResolver;

use crate::config::{ResolverConfig, ResolverKind};
use crate::extractor::is_dotted_quad;
use crate::utils::format_count;

/// Log progress every this many domains
const PROGRESS_INTERVAL: usize = 500;

/// Trait for IPv4 resolution strategies
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DomainResolver: Send + Sync {
    /// Resolve `domain` to its IPv4 addresses, first-seen order, no
    /// duplicates. Failures yield an empty list.
    async fn resolve(&self, domain: &str) -> Vec<Ipv4Addr>;

    /// Short name for logging
    fn name(&self) -> &'static str;
}

/// Create a resolver based on configuration
pub fn create_resolver(config: &ResolverConfig) -> Result<Box<dyn DomainResolver>> {
    match config.kind {
        ResolverKind::Doh => Ok(Box::new(DohResolver::new(
            &config.doh_url,
            config.bootstrap_ip,
            config.timeout(),
        )?)),
        ResolverKind::System => Ok(Box::new(SystemResolver::new(config.timeout()))),
        ResolverKind::Nameserver => Ok(Box::new(NameserverResolver::new(
            config.nameserver,
            config.timeout(),
            config.retries,
        ))),
    }
}

/// Resolve every domain and merge the results in domain order.
///
/// Up to `concurrency` lookups are in flight at once, each bounded by
/// `task_timeout`. Results are consumed in input order regardless of which
/// lookup finishes first, so when two domains share an address the one
/// earlier in `domains` claims it.
pub async fn resolve_all(
    resolver: &dyn DomainResolver,
    domains: &[String],
    concurrency: usize,
    task_timeout: Duration,
) -> AddressAccumulator {
    info!(
        "Resolving {} domains via {} ({} in parallel)...",
        format_count(domains.len()),
        resolver.name(),
        concurrency
    );

    let mut accumulator = AddressAccumulator::new();
    let mut results = stream::iter(domains)
        .map(|domain| async move {
            let addresses = match tokio::time::timeout(task_timeout, resolver.resolve(domain)).await
            {
                Ok(addresses) => addresses,
                Err(_) => {
                    debug!("{}: timed out after {:?}", domain, task_timeout);
                    Vec::new()
                }
            };
            (domain, addresses)
        })
        .buffered(concurrency.max(1));

    let mut done = 0;
    while let Some((domain, addresses)) = results.next().await {
        accumulator.claim(domain, addresses);
        done += 1;
        if done % PROGRESS_INTERVAL == 0 {
            info!(
                "Resolved {}/{} domains ({} addresses so far)",
                format_count(done),
                format_count(domains.len()),
                format_count(accumulator.address_count())
            );
        }
    }

    accumulator
}

/// Accept a textual address only if it is a dotted quad that parses as a
/// real IPv4 address.
pub(crate) fn accept_ipv4(data: &str) -> Option<Ipv4Addr> {
    let data = data.trim();
    if !is_dotted_quad(data) {
        return None;
    }
    data.parse().ok()
}

/// Append `addr` unless already present, keeping first-seen order
pub(crate) fn push_unique(addresses: &mut Vec<Ipv4Addr>, addr: Ipv4Addr) {
    if !addresses.contains(&addr) {
        addresses.push(addr);
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Resolver answering from a fixed table, recording every query
    pub struct StaticResolver {
        pub answers: HashMap<String, Vec<Ipv4Addr>>,
        pub delays: HashMap<String, Duration>,
        pub queried: Mutex<Vec<String>>,
    }

    impl StaticResolver {
        /// `answers` maps a domain to a comma-separated address list
        pub fn new(answers: &[(&str, &str)]) -> Self {
            Self {
                answers: answers
                    .iter()
                    .map(|(domain, ips)| {
                        (
                            domain.to_string(),
                            ips.split(',')
                                .filter(|ip| !ip.is_empty())
                                .map(|ip| ip.parse().unwrap())
                                .collect(),
                        )
                    })
                    .collect(),
                delays: HashMap::new(),
                queried: Mutex::new(Vec::new()),
            }
        }

        pub fn with_delay(mut self, domain: &str, delay: Duration) -> Self {
            self.delays.insert(domain.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl DomainResolver for StaticResolver {
        async fn resolve(&self, domain: &str) -> Vec<Ipv4Addr> {
            self.queried.lock().unwrap().push(domain.to_string());
            if let Some(delay) = self.delays.get(domain) {
                tokio::time::sleep(*delay).await;
            }
            self.answers.get(domain).cloned().unwrap_or_default()
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }
}
