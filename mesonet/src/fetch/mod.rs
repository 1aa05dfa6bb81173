//! Oklahoma Mesonet data file retrieval.
//!
//! Key characteristics of the service:
//! - Files are addressed by date-derived directory plus a filename
//! - Snapshot files exist every 5 minutes; series files once per station-day
//! - One unauthenticated GET per file, body is the raw text file

mod client;
mod error;
mod mock;
mod request;

pub use client::{DEFAULT_BASE_URL, DataSource, MesonetClient, MesonetConfig};
pub use error::FetchError;
pub use mock::MockMesonetClient;
pub use request::{DataKind, DataRequest};
