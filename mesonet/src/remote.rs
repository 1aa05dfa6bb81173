//! Fetch-and-read in one call.

use chrono::NaiveDateTime;

use crate::cache::CachedMesonetClient;
use crate::domain::StationId;
use crate::fetch::{DataSource, FetchError};
use crate::reader::{ObservationTable, ReadError, ReadOptions, read_table_bytes};

/// Errors from [`remote_table`]: whichever stage failed, unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Fetch a data file (through the cache) and read it into a table.
///
/// # Arguments
/// * `client` - Cached data source
/// * `timestamp` - Time of interest; defaults to now. For snapshots this is
///   floored to 5 minutes, for a station series only the date is used.
/// * `fields` - Fields to keep, in output order; `None` keeps every column
/// * `station` - Station id (any case) for a time series; `None` for a
///   network snapshot
/// * `rename_fields` - Rename columns to human-readable aliases
pub fn remote_table<S: DataSource>(
    client: &CachedMesonetClient<S>,
    timestamp: Option<NaiveDateTime>,
    fields: Option<&[&str]>,
    station: Option<&str>,
    rename_fields: bool,
) -> Result<ObservationTable, RemoteError> {
    let station = station
        .map(StationId::parse)
        .transpose()
        .map_err(FetchError::from)?;

    let bytes = client.fetch(timestamp, station)?;

    let mut options = ReadOptions::new().with_rename_fields(rename_fields);
    if let Some(fields) = fields {
        options = options.with_fields(fields.iter().copied());
    }

    Ok(read_table_bytes(&bytes, &options)?)
}
