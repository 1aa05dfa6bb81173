//! Oklahoma Mesonet observation reader.
//!
//! Fetches snapshot and station time-series data files from the Mesonet
//! servers and parses them into typed, labeled columns ready for plotting.

pub mod cache;
pub mod domain;
pub mod fetch;
pub mod reader;
pub mod remote;
pub mod stations;

pub use remote::{RemoteError, remote_table};
