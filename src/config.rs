//! Configuration management for fwdlist.
//!
//! Every field has a built-in default, so the tool runs without a config
//! file. A YAML file passed with `--config` overrides any subset of them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FwdListError;

/// GFWList, base64 encoded with `!` comment lines
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt";

/// Upper bound for one domain's lookups, all retries included
const MAX_TASK_TIMEOUT_SECS: u64 = 3600;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote domain list (must be HTTPS)
    pub source_url: String,

    /// Timeout for downloading the domain list
    pub fetch_timeout_secs: u64,

    /// `/ip dns static` forward script settings
    pub forward: ForwardConfig,

    /// `/ip firewall address-list` script settings
    pub address_list: AddressListConfig,

    /// Resolver used for the address-list script
    pub resolver: ResolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            fetch_timeout_secs: 30,
            forward: ForwardConfig::default(),
            address_list: AddressListConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, otherwise use the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.source_url.starts_with("https://") {
            anyhow::bail!(invalid(format!(
                "Source URL must use HTTPS: {}",
                self.source_url
            )));
        }

        if self.fetch_timeout_secs == 0 {
            anyhow::bail!(invalid("fetch_timeout_secs must be at least 1"));
        }

        if self.forward.forward_to.is_empty() {
            anyhow::bail!(invalid("forward.forward_to needs at least one DNS server"));
        }
        for target in &self.forward.forward_to {
            if target.parse::<Ipv4Addr>().is_err() {
                anyhow::bail!(invalid(format!(
                    "Invalid forward target '{}': expected an IPv4 address",
                    target
                )));
            }
        }
        if !is_valid_routeros_value(&self.forward.comment) {
            anyhow::bail!(invalid(format!(
                "Invalid forward.comment '{}'",
                self.forward.comment
            )));
        }

        if self.address_list.list_name.is_empty()
            || !is_valid_routeros_value(&self.address_list.list_name)
        {
            anyhow::bail!(invalid(format!(
                "Invalid address_list.list_name '{}'",
                self.address_list.list_name
            )));
        }
        if !is_valid_routeros_value(&self.address_list.comment_prefix) {
            anyhow::bail!(invalid(format!(
                "Invalid address_list.comment_prefix '{}'",
                self.address_list.comment_prefix
            )));
        }

        self.resolver.validate()
    }

    /// Generate default config with comments
    pub fn generate_default_yaml() -> String {
        include_str!("../templates/config.yaml").to_string()
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn invalid(message: impl Into<String>) -> FwdListError {
    FwdListError::Config(message.into())
}

/// Values end up inside double quotes in the script; quotes, backslashes
/// and line breaks would break out of them.
fn is_valid_routeros_value(value: &str) -> bool {
    !value.chars().any(|c| matches!(c, '"' | '\\' | '\r' | '\n' | '$'))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForwardConfig {
    pub output: PathBuf,
    /// Upstream DNS servers written to `forward-to=`
    pub forward_to: Vec<String>,
    /// Comment tag on every entry, also used by the cleanup hint
    pub comment: String,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("fwd_list_mikrotik_dns.rsc"),
            forward_to: vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()],
            comment: "Domain_FwdList".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressListConfig {
    pub output: PathBuf,
    /// Address list name matched by the mangle rules on the router
    pub list_name: String,
    pub comment_prefix: String,
}

impl Default for AddressListConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("fwd-ip-list.rsc"),
            list_name: "ProxyRouteIPs".to_string(),
            comment_prefix: "RouteIP-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// DNS-over-HTTPS JSON API (default)
    #[default]
    Doh,
    /// Host resolver (getaddrinfo)
    System,
    /// Plain DNS against a named server
    Nameserver,
}

impl std::fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolverKind::Doh => write!(f, "doh"),
            ResolverKind::System => write!(f, "system"),
            ResolverKind::Nameserver => write!(f, "nameserver"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub kind: ResolverKind,

    /// DoH JSON endpoint
    pub doh_url: String,

    /// Connect to the DoH host at this address instead of resolving it
    /// through the local resolver
    pub bootstrap_ip: Option<IpAddr>,

    /// Server queried by the `nameserver` strategy (port 53)
    pub nameserver: IpAddr,

    /// Per-query timeout
    pub timeout_secs: u64,

    /// Attempts per query for the `nameserver` strategy
    pub retries: usize,

    /// Domains resolved in parallel; 1 resolves strictly sequentially
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            kind: ResolverKind::Doh,
            doh_url: "https://cloudflare-dns.com/dns-query".to_string(),
            bootstrap_ip: Some(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1))),
            nameserver: IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
            timeout_secs: 5,
            retries: 2,
            concurrency: 16,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kind == ResolverKind::Doh && !self.doh_url.starts_with("https://") {
            anyhow::bail!(invalid(format!("DoH URL must use HTTPS: {}", self.doh_url)));
        }
        if self.timeout_secs == 0 {
            anyhow::bail!(invalid("resolver.timeout_secs must be at least 1"));
        }
        if self.retries == 0 {
            anyhow::bail!(invalid("resolver.retries must be at least 1"));
        }
        if self.task_timeout() > Duration::from_secs(MAX_TASK_TIMEOUT_SECS) {
            anyhow::bail!(invalid(format!(
                "resolver.timeout_secs * resolver.retries must not exceed {} seconds",
                MAX_TASK_TIMEOUT_SECS
            )));
        }
        if self.concurrency == 0 {
            anyhow::bail!(invalid("resolver.concurrency must be at least 1"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Upper bound for one domain, covering every retry
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.saturating_mul(self.retries as u64))
    }
}
