//! HTTP fetcher for downloading the remote domain list.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::FwdListError;
use crate::utils::format_bytes;

/// Maximum size of the downloaded list (10 MB)
/// GFWList is ~150 KB, so 10 MB provides ample margin
const MAX_LIST_SIZE: usize = 10 * 1024 * 1024;

/// HTTP client for fetching the domain list
pub struct Fetcher {
    client: Client,
    max_size: usize,
}

impl Fetcher {
    /// Create a new fetcher with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self, FwdListError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("fwdlist/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FwdListError::Network(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_size: MAX_LIST_SIZE,
        })
    }

    /// Override the download size limit
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Download `url` once. Any connection failure, timeout, non-2xx status
    /// or oversized body is a `Network` error; there is no retry.
    pub async fn fetch(&self, url: &str) -> Result<String, FwdListError> {
        info!("Fetching {}...", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FwdListError::Network(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FwdListError::Network(format!("{}: HTTP {}", url, status)));
        }

        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_size {
                return Err(FwdListError::Network(format!(
                    "Response too large: {} bytes (max: {} bytes)",
                    content_length, self.max_size
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| FwdListError::Network(format!("Failed to read response body: {}", e)))?;

        // Chunked responses carry no Content-Length
        if body.len() > self.max_size {
            return Err(FwdListError::Network(format!(
                "Downloaded content too large: {} bytes (max: {} bytes)",
                body.len(),
                self.max_size
            )));
        }

        debug!("Downloaded {}", format_bytes(body.len() as u64));
        Ok(body)
    }
}
