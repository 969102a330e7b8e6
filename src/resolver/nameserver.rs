//! Plain DNS resolver forwarding `A` queries to one named server.

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tracing::debug;

use super::{push_unique, DomainResolver};

const DNS_PORT: u16 = 53;

/// Resolver sending queries to a single upstream server
pub struct NameserverResolver {
    resolver: TokioAsyncResolver,
    server: IpAddr,
}

impl NameserverResolver {
    /// Each query waits up to `timeout` per attempt, for `attempts` attempts.
    pub fn new(server: IpAddr, timeout: Duration, attempts: usize) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(&[server], DNS_PORT, true);
        let config = ResolverConfig::from_parts(None, vec![], group);

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = attempts;
        // One lookup per domain per run; caching buys nothing
        opts.cache_size = 0;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            server,
        }
    }
}

#[async_trait]
impl DomainResolver for NameserverResolver {
    async fn resolve(&self, domain: &str) -> Vec<Ipv4Addr> {
        // Fully qualified, so no search domain is appended
        let fqdn = format!("{}.", domain.trim_end_matches('.'));

        match self.resolver.ipv4_lookup(fqdn.as_str()).await {
            Ok(lookup) => {
                let mut addresses = Vec::new();
                for record in lookup.iter() {
                    push_unique(&mut addresses, record.0);
                }
                addresses
            }
            Err(e) => {
                debug!("{} via {}: {}", domain, self.server, e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "nameserver"
    }
}
