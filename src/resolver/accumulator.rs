//! Global address de-duplication across domains.

use std::collections::HashSet;
use std::net::Ipv4Addr;

/// Addresses attributed to one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAddresses {
    pub domain: String,
    /// First-seen order; only addresses no earlier domain claimed
    pub addresses: Vec<Ipv4Addr>,
}

/// Collects per-domain results with a first-writer-wins rule: an address
/// belongs to the first domain that claims it, and later claims of the
/// same address are dropped.
///
/// Domains are kept in claim order, including those left with no
/// addresses.
#[derive(Debug, Default)]
pub struct AddressAccumulator {
    seen: HashSet<Ipv4Addr>,
    entries: Vec<DomainAddresses>,
}

impl AddressAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the addresses resolved for the next domain.
    ///
    /// Returns how many of them were newly claimed.
    pub fn claim<I>(&mut self, domain: &str, addresses: I) -> usize
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        let claimed: Vec<Ipv4Addr> = addresses
            .into_iter()
            .filter(|addr| self.seen.insert(*addr))
            .collect();
        let count = claimed.len();

        self.entries.push(DomainAddresses {
            domain: domain.to_string(),
            addresses: claimed,
        });

        count
    }

    /// Total distinct addresses claimed so far
    pub fn address_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of domains that claimed at least one address
    pub fn resolved_domain_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| !e.addresses.is_empty())
            .count()
    }

    pub fn entries(&self) -> &[DomainAddresses] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<DomainAddresses> {
        self.entries
    }
}
