//! Mesonet HTTP client.
//!
//! Performs a single blocking GET per request. There is no retry; any
//! transport failure or non-success status is reported to the caller.

use std::time::Duration;

use tracing::debug;

use super::error::FetchError;
use super::request::DataRequest;

/// Default endpoint for the public data file service.
pub const DEFAULT_BASE_URL: &str = "http://www.mesonet.org/public/data/getfile.php";

/// Something that can produce the raw bytes of a Mesonet data file.
///
/// Implemented by the live [`MesonetClient`] and by
/// [`MockMesonetClient`](super::MockMesonetClient) for offline use.
pub trait DataSource {
    /// Retrieve the file described by `request`.
    fn fetch(&self, request: &DataRequest) -> Result<Vec<u8>, FetchError>;
}

/// Configuration for the Mesonet client.
#[derive(Debug, Clone)]
pub struct MesonetConfig {
    /// Base URL of the `getfile` endpoint
    pub base_url: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl MesonetConfig {
    /// Create a config pointing at the public endpoint.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (for testing or mirrors).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set an explicit request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for MesonetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking client for the Mesonet data file service.
#[derive(Debug, Clone)]
pub struct MesonetClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl MesonetClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MesonetConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl DataSource for MesonetClient {
    fn fetch(&self, request: &DataRequest) -> Result<Vec<u8>, FetchError> {
        let url = request.url(&self.base_url)?;
        debug!(%url, "requesting data file");

        let response = self.http.get(url.clone()).send()?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes()?;
        debug!(bytes = body.len(), "data file received");

        Ok(body.to_vec())
    }
}
