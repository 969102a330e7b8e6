//! Resolver backed by the host's own resolver (getaddrinfo).

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tracing::debug;

use super::{push_unique, DomainResolver};

/// Resolver using the operating system's name resolution.
///
/// `getaddrinfo` cannot be cancelled: a lookup that hits `timeout` keeps
/// running on tokio's blocking pool until the OS gives up. At most
/// `resolver.concurrency` such lookups are outstanding at any time, since
/// `resolve_all` never starts more.
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl DomainResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Vec<Ipv4Addr> {
        let host = domain.to_string();
        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_host(&host));

        let ips = match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Ok(ips))) => ips,
            Ok(Ok(Err(e))) => {
                debug!("{}: {}", domain, e);
                return Vec::new();
            }
            Ok(Err(e)) => {
                debug!("{}: lookup task failed: {}", domain, e);
                return Vec::new();
            }
            Err(_) => {
                debug!("{}: DNS timeout", domain);
                return Vec::new();
            }
        };

        let mut addresses = Vec::new();
        for ip in ips {
            if let IpAddr::V4(v4) = ip {
                push_unique(&mut addresses, v4);
            }
        }
        addresses
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
