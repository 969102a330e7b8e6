//! RouterOS `.rsc` script rendering.
//!
//! Two script shapes are produced. Both start with `#` header comments and
//! a blank line, then a single menu context line, then `add` commands:
//!
//! ```text
//! /ip dns static
//! add name="example.com" type=FWD match-subdomain=yes forward-to=8.8.8.8,8.8.4.4 comment="Domain_FwdList"
//! ```
//!
//! ```text
//! /ip firewall address-list
//! remove [find list="ProxyRouteIPs"]
//! add address="93.184.216.34" list="ProxyRouteIPs" comment="RouteIP-example.com"
//! ```

use chrono::{DateTime, SecondsFormat, Utc};

use crate::resolver::DomainAddresses;
use crate::utils::truncate_chars;

/// RouterOS limit for the address-list `comment` field
pub const MAX_COMMENT_LEN: usize = 63;

/// Parameters of a `/ip dns static` forward script
#[derive(Debug, Clone)]
pub struct ForwardScript<'a> {
    pub source_url: &'a str,
    pub forward_to: &'a [String],
    pub comment: &'a str,
    pub generated_at: DateTime<Utc>,
}

/// Parameters of a `/ip firewall address-list` script
#[derive(Debug, Clone)]
pub struct AddressListScript<'a> {
    pub source_url: &'a str,
    pub list_name: &'a str,
    pub comment_prefix: &'a str,
    pub generated_at: DateTime<Utc>,
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Address-list entry comment: prefix + domain, at most 63 characters
pub fn entry_comment(prefix: &str, domain: &str) -> String {
    let comment = format!("{}{}", prefix, domain);
    truncate_chars(&comment, MAX_COMMENT_LEN).to_string()
}

impl ForwardScript<'_> {
    /// Render one FWD entry per domain, in the order given.
    pub fn render(&self, domains: &[String]) -> String {
        let forward_to = self.forward_to.join(",");
        let mut out = String::new();

        out.push_str("# Domain forward list DNS static entries for Mikrotik\n");
        out.push_str(&format!("# Generated at: {}\n", timestamp(&self.generated_at)));
        out.push_str(&format!("# Source: {}\n", self.source_url));
        out.push_str(&format!(
            "# Clean up old entries before import: /ip dns static remove [find comment~\"{}\"]\n",
            self.comment
        ));
        out.push('\n');
        out.push_str("/ip dns static\n");

        for domain in domains {
            out.push_str(&format!(
                "add name=\"{}\" type=FWD match-subdomain=yes forward-to={} comment=\"{}\"\n",
                domain, forward_to, self.comment
            ));
        }

        out
    }
}

impl AddressListScript<'_> {
    /// Render one entry per (domain, address) pair, in the order given.
    pub fn render(&self, entries: &[DomainAddresses]) -> String {
        let mut out = String::new();

        out.push_str("# IP address list for policy routing\n");
        out.push_str(&format!("# Generated at: {}\n", timestamp(&self.generated_at)));
        out.push_str(&format!("# Source: {}\n", self.source_url));
        out.push('\n');
        out.push_str("/ip firewall address-list\n");
        out.push_str(&format!("remove [find list=\"{}\"]\n", self.list_name));

        for entry in entries {
            let comment = entry_comment(self.comment_prefix, &entry.domain);
            for address in &entry.addresses {
                out.push_str(&format!(
                    "add address=\"{}\" list=\"{}\" comment=\"{}\"\n",
                    address, self.list_name, comment
                ));
            }
        }

        out
    }
}
