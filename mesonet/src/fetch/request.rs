//! Data file requests and URL assembly.
//!
//! The network publishes two kinds of file:
//! - snapshot (`mdf`) files, one reading per station for a 5-minute slot
//! - time-series (`mts`) files, a day of readings for a single station
//!
//! Both live under `/<kind>/YYYY/MM/DD/` and are served through a single
//! `getfile.php` endpoint that takes the path and filename as query
//! parameters.

use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use url::Url;

use crate::domain::StationId;

use super::error::FetchError;

/// Snapshot files are published every 5 minutes.
const SNAPSHOT_INTERVAL_MINS: u32 = 5;

/// Kind of data file being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Whole-network snapshot (`.mdf`)
    Snapshot,
    /// Single-station time series (`.mts`)
    Series,
}

impl DataKind {
    /// Directory and extension code used by the network.
    pub fn code(&self) -> &'static str {
        match self {
            DataKind::Snapshot => "mdf",
            DataKind::Series => "mts",
        }
    }
}

/// A fully resolved request for one data file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataRequest {
    kind: DataKind,
    timestamp: NaiveDateTime,
    station: Option<StationId>,
}

impl DataRequest {
    /// Build the request for `timestamp`, optionally for a single station.
    ///
    /// Without a station this is a snapshot request and the timestamp is
    /// floored to the preceding 5-minute boundary. With a station it is a
    /// time-series request and only the calendar date matters.
    pub fn new(timestamp: NaiveDateTime, station: Option<StationId>) -> Self {
        match station {
            None => Self::snapshot(timestamp),
            Some(station) => Self::series(timestamp, station),
        }
    }

    /// Snapshot request for the 5-minute slot containing `timestamp`.
    pub fn snapshot(timestamp: NaiveDateTime) -> Self {
        Self {
            kind: DataKind::Snapshot,
            timestamp: floor_to_interval(timestamp),
            station: None,
        }
    }

    /// Time-series request for `station` on the date of `timestamp`.
    pub fn series(timestamp: NaiveDateTime, station: StationId) -> Self {
        Self {
            kind: DataKind::Series,
            timestamp,
            station: Some(station),
        }
    }

    /// Kind of file requested.
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Timestamp the request was resolved to (floored for snapshots).
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Station of a time-series request.
    pub fn station(&self) -> Option<StationId> {
        self.station
    }

    /// Date-derived directory, e.g. `/mts/2008/08/12/`.
    pub fn directory(&self) -> String {
        format!(
            "/{}/{:04}/{:02}/{:02}/",
            self.kind.code(),
            self.timestamp.year(),
            self.timestamp.month(),
            self.timestamp.day()
        )
    }

    /// File name, e.g. `200808121235.mdf` or `20080812nrmn.mts`.
    pub fn filename(&self) -> String {
        match self.station {
            None => format!(
                "{}.{}",
                self.timestamp.format("%Y%m%d%H%M"),
                self.kind.code()
            ),
            Some(station) => format!(
                "{}{}.{}",
                self.timestamp.format("%Y%m%d"),
                station.to_lowercase(),
                self.kind.code()
            ),
        }
    }

    /// Assemble the download URL against `base_url`.
    ///
    /// The endpoint wants the full path (directory plus filename) in `dir`
    /// and the bare filename in `filename`; both are URL-encoded.
    pub fn url(&self, base_url: &str) -> Result<Url, FetchError> {
        let filename = self.filename();
        let dir = format!("{}{}", self.directory(), filename);
        let url = Url::parse_with_params(base_url, [("dir", dir), ("filename", filename)])?;
        Ok(url)
    }
}

/// Floor to the preceding snapshot boundary, zeroing seconds and sub-seconds.
fn floor_to_interval(timestamp: NaiveDateTime) -> NaiveDateTime {
    let excess = TimeDelta::minutes(i64::from(timestamp.minute() % SNAPSHOT_INTERVAL_MINS))
        + TimeDelta::seconds(i64::from(timestamp.second()))
        + TimeDelta::nanoseconds(i64::from(timestamp.nanosecond()));
    timestamp - excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const BASE: &str = "http://www.mesonet.org/public/data/getfile.php";

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, micro)
            .unwrap()
    }

    fn stid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn snapshot_floors_to_five_minutes() {
        let req = DataRequest::new(at(2008, 8, 12, 14, 37, 42, 123_456), None);
        assert_eq!(req.kind(), DataKind::Snapshot);
        assert_eq!(req.timestamp(), at(2008, 8, 12, 14, 35, 0, 0));
        assert_eq!(req.filename(), "200808121435.mdf");
        assert_eq!(req.directory(), "/mdf/2008/08/12/");
    }

    #[test]
    fn snapshot_on_boundary_is_unchanged() {
        let ts = at(2008, 8, 12, 0, 0, 0, 0);
        assert_eq!(DataRequest::snapshot(ts).timestamp(), ts);
        let ts = at(2008, 8, 12, 23, 55, 0, 0);
        assert_eq!(DataRequest::snapshot(ts).timestamp(), ts);
    }

    #[test]
    fn series_request_uses_date_and_lowercase_station() {
        let req = DataRequest::new(at(2008, 8, 12, 17, 3, 9, 0), Some(stid("NRMN")));
        assert_eq!(req.kind(), DataKind::Series);
        assert_eq!(req.filename(), "20080812nrmn.mts");
        assert_eq!(req.directory(), "/mts/2008/08/12/");
        // Time of day is not touched for series requests.
        assert_eq!(req.timestamp(), at(2008, 8, 12, 17, 3, 9, 0));
    }

    #[test]
    fn series_station_is_case_insensitive() {
        let ts = at(2008, 8, 12, 0, 0, 0, 0);
        let a = DataRequest::series(ts, stid("nrmn"));
        let b = DataRequest::series(ts, stid("NRMN"));
        assert_eq!(a, b);
        assert_eq!(a.filename(), b.filename());
    }

    #[test]
    fn url_carries_dir_and_filename() {
        let req = DataRequest::new(at(2008, 8, 12, 0, 0, 0, 0), Some(stid("NRMN")));
        let url = req.url(BASE).unwrap();

        assert_eq!(url.host_str(), Some("www.mesonet.org"));
        assert_eq!(url.path(), "/public/data/getfile.php");

        let params: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            params,
            vec![
                ("dir".to_string(), "/mts/2008/08/12/20080812nrmn.mts".to_string()),
                ("filename".to_string(), "20080812nrmn.mts".to_string()),
            ]
        );
        assert_eq!(
            url.as_str(),
            "http://www.mesonet.org/public/data/getfile.php?dir=%2Fmts%2F2008%2F08%2F12%2F20080812nrmn.mts&filename=20080812nrmn.mts"
        );
    }

    #[test]
    fn invalid_base_url() {
        let req = DataRequest::snapshot(at(2008, 8, 12, 0, 0, 0, 0));
        assert!(matches!(req.url("not a url"), Err(FetchError::InvalidUrl(_))));
    }
}
