//! # fwdlist - GFWList to Mikrotik RouterOS scripts
//!
//! Downloads the GFWList domain list, extracts the domains it names and
//! renders RouterOS `.rsc` scripts for selective routing.
//!
//! ## Features
//!
//! - **Forward entries** - `/ip dns static` FWD rules sending each domain to chosen DNS servers
//! - **Address list** - resolve every domain and emit a `/ip firewall address-list`
//! - **Pluggable resolution** - DNS-over-HTTPS (default), system resolver or a named DNS server
//! - **Bounded concurrency** - parallel lookups with deterministic, order-preserving merge
//! - **Atomic output** - scripts are replaced in one rename, never half-written
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        fwdlist                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: forward, address-list, domains, config     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Fetcher (reqwest + rustls)                                 │
//! │    └── Decoder (base64) -> Extractor (regex)                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Resolver (DomainResolver trait)                            │
//! │    ├── DohResolver (JSON API)                               │
//! │    ├── SystemResolver (getaddrinfo)                         │
//! │    ├── NameserverResolver (hickory)                         │
//! │    └── AddressAccumulator (first domain claims an IP)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Render (chrono) -> Output (tempfile rename)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use fwdlist::config::Config;
//! use fwdlist::decoder::decode;
//! use fwdlist::extractor::extract;
//! use fwdlist::fetcher::Fetcher;
//! use fwdlist::resolver::{create_resolver, resolve_all};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!
//!     let fetcher = Fetcher::new(config.fetch_timeout())?;
//!     let raw = fetcher.fetch(&config.source_url).await?;
//!     let domains = extract(&decode(&raw)?);
//!
//!     let resolver = create_resolver(&config.resolver)?;
//!     let resolved = resolve_all(
//!         resolver.as_ref(),
//!         &domains,
//!         config.resolver.concurrency,
//!         config.resolver.task_timeout(),
//!     )
//!     .await;
//!
//!     println!("{} addresses", resolved.address_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`decoder`] - Base64 payload decoding
//! - [`error`] - Typed pipeline errors
//! - [`extractor`] - Domain extraction from list rules
//! - [`fetcher`] - HTTP client for downloading the list
//! - [`output`] - Atomic script writing
//! - [`render`] - RouterOS script rendering
//! - [`resolver`] - IPv4 resolution strategies and address de-duplication
//! - [`utils`] - Common utility functions (formatting, truncation)

pub mod cli;
pub mod commands;
pub mod config;
pub mod decoder;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod output;
pub mod render;
pub mod resolver;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::FwdListError;
