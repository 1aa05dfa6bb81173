//! Fetch error types.

use crate::domain::InvalidStationId;

/// Errors that can occur when retrieving a Mesonet data file.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, body read, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} fetching {url}")]
    Status { status: u16, url: String },

    /// Request URL could not be assembled
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Station id supplied by the caller is malformed
    #[error(transparent)]
    InvalidStation(#[from] InvalidStationId),

    /// Offline data source has no file for the request
    #[error("no data file named {filename}")]
    NotFound { filename: String },

    /// Reading offline data failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
