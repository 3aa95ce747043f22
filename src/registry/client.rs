//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Connect and per-read timeouts, plus a total timeout for small API requests
//! - Configurable User-Agent
//! - Status code to error mapping
//! - JSON body decoding
//!
//! Requests are issued once; failures are reported to the caller as-is.

use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("goupdate/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    /// Deadline for a whole API request; archive downloads only use the idle timeouts
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration.
    ///
    /// `timeout` bounds connecting and each individual read. It bounds a whole
    /// request only for [`HttpClient::get`], so long transfers that keep
    /// receiving bytes are never cut off.
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Total deadline applied to API requests
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request bounded by the total timeout, mapping transport and status failures
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        let request = self.client.get(url).timeout(self.timeout);
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(url)
            } else {
                RegistryError::network_error(url, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::network_error(url, format!("HTTP {}", status)));
        }

        Ok(response)
    }

    /// Perform a GET request and parse the JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, RegistryError> {
        let response = self.get(url).await?;
        response.json::<T>().await.map_err(|e| {
            RegistryError::invalid_response(url, format!("failed to parse JSON: {}", e))
        })
    }
}
