//! HTTP fetcher for downloading the OUI registry.

use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::error::{OuiError, Result};

/// Default connect timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// The whole transfer, body included, may take this many connect timeouts.
pub const TRANSFER_TIMEOUT_FACTOR: u32 = 10;

/// Where registry bytes come from.
///
/// The loader only needs a readable body for a URL; this seam lets tests
/// substitute a mock for the network.
#[cfg_attr(test, automock)]
pub trait RegistrySource {
    /// Start fetching `url` and return a stream over the response body.
    ///
    /// Errors must be [`OuiError::DownloadFailed`].
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>>;
}

/// Blocking HTTP client for the registry
pub struct HttpFetcher {
    client: Client,
    transfer_timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher that gives up connecting after `timeout`.
    ///
    /// The full download, reading the body included, is bounded by
    /// `timeout * TRANSFER_TIMEOUT_FACTOR`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let transfer_timeout = timeout.saturating_mul(TRANSFER_TIMEOUT_FACTOR);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(transfer_timeout)
            .user_agent(format!("ouilookup/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OuiError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            transfer_timeout,
        })
    }

    /// Upper bound on a whole download.
    pub fn transfer_timeout(&self) -> Duration {
        self.transfer_timeout
    }
}

impl RegistrySource for HttpFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| OuiError::DownloadFailed {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        match response.content_length() {
            Some(len) => debug!("{} responded with {} bytes", url, len),
            None => debug!("{} responded without Content-Length", url),
        }

        Ok(Box::new(response))
    }
}
