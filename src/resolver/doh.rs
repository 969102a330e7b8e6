//! DNS-over-HTTPS resolver using the JSON API (`application/dns-json`).

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::debug;

use super::{accept_ipv4, push_unique, DomainResolver};
use crate::error::FwdListError;

const DNS_JSON: &str = "application/dns-json";

/// Record type code for an IPv4 address
const RECORD_TYPE_A: u16 = 1;

#[derive(Debug, Deserialize)]
struct DohResponse {
    /// Kept raw so one odd record does not discard the rest
    #[serde(rename = "Answer", default)]
    answer: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct DohAnswer {
    #[serde(rename = "type")]
    record_type: u16,
    data: String,
}

/// Extract accepted IPv4 addresses from a DoH JSON body.
///
/// Keeps `Answer` entries of type 1 (A) whose data is a valid dotted
/// quad. Entries missing `type` or `data` are skipped. A missing `Answer`
/// array means no addresses.
///
/// # Examples
/// ```
/// use fwdlist::resolver::parse_doh_response;
/// let body = r#"{"Answer":[{"type":1,"data":"93.184.216.34"},{"type":5,"data":"cname.example."}]}"#;
/// let addrs = parse_doh_response(body).unwrap();
/// assert_eq!(addrs, vec!["93.184.216.34".parse::<std::net::Ipv4Addr>().unwrap()]);
/// ```
pub fn parse_doh_response(body: &str) -> Result<Vec<Ipv4Addr>, FwdListError> {
    let response: DohResponse = serde_json::from_str(body)
        .map_err(|e| FwdListError::Decode(format!("invalid DoH response: {}", e)))?;

    let mut addresses = Vec::new();
    for raw in response.answer {
        let answer = match serde_json::from_value::<DohAnswer>(raw) {
            Ok(answer) => answer,
            Err(e) => {
                debug!("Skipping unreadable DoH answer: {}", e);
                continue;
            }
        };
        if answer.record_type != RECORD_TYPE_A {
            continue;
        }
        match accept_ipv4(&answer.data) {
            Some(addr) => push_unique(&mut addresses, addr),
            None => debug!("Ignoring malformed A record data {:?}", answer.data),
        }
    }
    Ok(addresses)
}

/// Resolver querying a DoH JSON endpoint
pub struct DohResolver {
    client: Client,
    endpoint: Url,
}

impl DohResolver {
    /// Create a DoH resolver for `endpoint`.
    ///
    /// With `bootstrap_ip`, connections to the endpoint host go straight to
    /// that address instead of through the local resolver. The URL keeps
    /// its host name, so TLS still verifies the provider's certificate.
    pub fn new(endpoint: &str, bootstrap_ip: Option<IpAddr>, timeout: Duration) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).with_context(|| format!("Invalid DoH URL: {}", endpoint))?;

        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(format!("fwdlist/{}", env!("CARGO_PKG_VERSION")));

        if let Some(ip) = bootstrap_ip {
            let host = endpoint
                .host_str()
                .ok_or_else(|| anyhow::anyhow!("DoH URL has no host: {}", endpoint))?;
            let port = endpoint.port_or_known_default().unwrap_or(443);
            debug!("Pinning DoH host {} to {}", host, ip);
            builder = builder.resolve(host, SocketAddr::new(ip, port));
        }

        let client = builder
            .build()
            .context("Failed to create DoH HTTP client")?;

        Ok(Self { client, endpoint })
    }

    async fn query(&self, domain: &str) -> Result<Vec<Ipv4Addr>, FwdListError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("name", domain)
            .append_pair("type", "A");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| FwdListError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FwdListError::Network(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FwdListError::Network(e.to_string()))?;

        parse_doh_response(&body)
    }
}

#[async_trait]
impl DomainResolver for DohResolver {
    async fn resolve(&self, domain: &str) -> Vec<Ipv4Addr> {
        match self.query(domain).await {
            Ok(addresses) => addresses,
            Err(e) => {
                debug!("{}: {}", domain, e);
                Vec::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "doh"
    }
}
