//! CLI command implementations.

pub mod address_list;
pub mod domains;
pub mod forward;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::decoder::decode;
use crate::error::FwdListError;
use crate::extractor::extract;
use crate::fetcher::Fetcher;
use crate::output::write_script;
use crate::utils::format_count;

/// Fetch, decode and extract the configured list.
///
/// Every failure here is fatal: nothing is written when the list cannot be
/// downloaded, decoded or yields no domains.
pub async fn load_domains(config: &Config) -> Result<Vec<String>> {
    let fetcher = Fetcher::new(config.fetch_timeout())?;
    let raw = fetcher
        .fetch(&config.source_url)
        .await
        .context("Failed to download domain list")?;

    let decoded = decode(&raw).context("Failed to decode domain list")?;

    let domains = extract(&decoded);
    if domains.is_empty() {
        return Err(FwdListError::EmptyResult(config.source_url.clone()).into());
    }

    info!("Extracted {} unique domains", format_count(domains.len()));
    Ok(domains)
}

/// Print the script on dry runs, otherwise write it and report the count.
pub(crate) fn emit(script: &str, path: &Path, entries: usize, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", script);
        return Ok(());
    }

    write_script(path, script)?;

    println!();
    println!(
        "[OK] {} entries written to {}",
        format_count(entries),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    use crate::config::Config;

    /// Encode rule lines the way the published list is: a `!` banner
    /// followed by the base64 payload wrapped at 64 columns.
    pub fn encoded_list(rules: &[&str]) -> String {
        let payload = STANDARD.encode(rules.join("\n"));
        let mut body = String::from("! Fixture list\n");
        for chunk in payload.as_bytes().chunks(64) {
            body.push_str(std::str::from_utf8(chunk).unwrap());
            body.push('\n');
        }
        body
    }

    pub fn config_for(url: &str) -> Config {
        Config {
            source_url: url.to_string(),
            fetch_timeout_secs: 5,
            ..Default::default()
        }
    }
}
