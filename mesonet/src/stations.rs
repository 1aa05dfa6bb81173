//! Station reference table.
//!
//! A copy of the network's station list (`geomeso.csv`) is embedded in the
//! crate so coordinates can be attached to observations without a second
//! download. Only the id, latitude and longitude columns are kept.

use serde::Serialize;

use crate::domain::StationId;
use crate::reader::ObservationTable;

/// Embedded station list. Comment lines, then a column-name line, then one
/// comma-separated record per station.
const STATION_TABLE: &str = "\
# Oklahoma Mesonet station locations (geomeso.csv excerpt)
# nlat/elon in decimal degrees (WGS84), elev in metres
# rang/cdir give distance (mi) and direction from the named city
stnm,stid,name,city,rang,cdir,cnty,nlat,elon,elev
1,ACME,Acme,Rush Springs,4.0,W,Grady,34.80833,-98.02325,397
2,ADAX,Ada,Ada,2.0,NNE,Pontotoc,34.79851,-96.66909,295
3,ALTU,Altus,Altus,3.0,S,Jackson,34.58722,-99.33808,416
4,ALV2,Alva,Alva,2.0,S,Woods,36.70823,-98.70974,439
5,ANT2,Antlers,Antlers,5.0,S,Pushmataha,34.24967,-95.66844,179
6,APAC,Apache,Apache,5.0,S,Caddo,34.91418,-98.29216,440
7,ARD2,Ardmore,Ardmore,2.0,NNE,Carter,34.19260,-97.08596,266
8,ARNE,Arnett,Arnett,4.0,W,Ellis,36.07204,-99.90308,719
9,BEAV,Beaver,Beaver,3.0,SSW,Beaver,36.80253,-100.53012,758
11,BESS,Bessie,Bessie,3.0,N,Washita,35.40185,-99.05847,511
12,BIXB,Bixby,Bixby,2.0,SW,Tulsa,35.96305,-95.86621,184
13,BLAC,Blackwell,Blackwell,3.0,W,Kay,36.75443,-97.25452,304
14,BOIS,Boise City,Boise City,2.0,ESE,Cimarron,36.69256,-102.49713,1267
40,GUTH,Guthrie,Guthrie,4.0,S,Logan,35.84891,-97.48025,330
48,HOOK,Hooker,Hooker,4.0,E,Texas,36.85530,-101.22570,912
50,IDAB,Idabel,Idabel,6.0,NW,McCurtain,33.83013,-94.88030,110
56,KENT,Kenton,Kenton,1.0,E,Cimarron,36.82937,-102.87820,1312
64,MEDF,Medford,Medford,2.0,N,Grant,36.79242,-97.74577,332
89,NRMN,Norman,Norman,3.0,N,Cleveland,35.23611,-97.46490,357
77,OKCE,Oklahoma City East,Oklahoma City,3.0,E,Oklahoma,35.47226,-97.46462,355
91,SPEN,Spencer,Spencer,4.0,SSE,Oklahoma,35.54208,-97.34146,373
100,STIL,Stillwater,Stillwater,2.0,W,Payne,36.12093,-97.09527,272
103,TAHL,Tahlequah,Tahlequah,4.0,NNW,Cherokee,35.97235,-94.98671,243
110,WOOD,Woodward,Woodward,2.0,W,Woodward,36.42329,-99.41682,625
";

/// Lines preceding the first station record.
const STATION_TABLE_SKIP_LINES: usize = 4;

/// 0-based positions of the kept columns.
const STID_COLUMN: usize = 1;
const LAT_COLUMN: usize = 7;
const LON_COLUMN: usize = 8;

/// Errors that can occur when parsing the station table.
#[derive(Debug, thiserror::Error)]
pub enum StationInfoError {
    /// The CSV layer rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record is missing a column or holds an unparsable value
    #[error("station table line {line}: {message}")]
    Parse { line: u64, message: String },

    /// The observations have no text station-id column to join on
    #[error("observation table has no STID text column")]
    MissingStationColumn,
}

/// Location of one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationLocation {
    pub stid: StationId,
    pub lat: f64,
    pub lon: f64,
}

/// Station id → location lookup, sorted by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationInfo {
    stations: Vec<StationLocation>,
}

impl StationInfo {
    /// Parse station info from CSV text with `skip_lines` leading lines.
    pub fn parse(text: &str, skip_lines: usize) -> Result<Self, StationInfoError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut stations = Vec::new();
        for record in reader.records().skip(skip_lines) {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());

            let field = |index: usize, name: &str| {
                record
                    .get(index)
                    .map(str::trim)
                    .ok_or_else(|| StationInfoError::Parse {
                        line,
                        message: format!("missing {name} column"),
                    })
            };
            let coordinate = |index: usize, name: &str| {
                let raw = field(index, name)?;
                raw.parse::<f64>().map_err(|_| StationInfoError::Parse {
                    line,
                    message: format!("invalid {name} '{raw}'"),
                })
            };

            let raw_stid = field(STID_COLUMN, "stid")?;
            let stid = StationId::parse(raw_stid).map_err(|e| StationInfoError::Parse {
                line,
                message: format!("{e} ('{raw_stid}')"),
            })?;

            stations.push(StationLocation {
                stid,
                lat: coordinate(LAT_COLUMN, "latitude")?,
                lon: coordinate(LON_COLUMN, "longitude")?,
            });
        }

        stations.sort_by_key(|s| s.stid);
        Ok(Self { stations })
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations, sorted by id.
    pub fn stations(&self) -> &[StationLocation] {
        &self.stations
    }

    /// Look up a station by id.
    pub fn get(&self, stid: &StationId) -> Option<&StationLocation> {
        self.stations
            .binary_search_by_key(stid, |s| s.stid)
            .ok()
            .map(|i| &self.stations[i])
    }

    /// Location of each row's station in an observation table.
    ///
    /// Rows whose STID is unknown or malformed map to `None`.
    pub fn locate<'a>(
        &'a self,
        table: &ObservationTable,
    ) -> Result<Vec<Option<&'a StationLocation>>, StationInfoError> {
        let ids = table
            .column("STID")
            .and_then(|c| c.as_text())
            .ok_or(StationInfoError::MissingStationColumn)?;

        Ok(ids
            .iter()
            .map(|id| StationId::parse(id).ok().and_then(|stid| self.get(&stid)))
            .collect())
    }
}

/// Station info parsed from the embedded station table.
pub fn station_info() -> Result<StationInfo, StationInfoError> {
    StationInfo::parse(STATION_TABLE, STATION_TABLE_SKIP_LINES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{ReadOptions, read_table_bytes};

    fn stid(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn embedded_table_parses() {
        let info = station_info().unwrap();
        assert_eq!(info.len(), 24);
        assert!(info.stations().windows(2).all(|w| w[0].stid < w[1].stid));
    }

    #[test]
    fn lookup_by_id() {
        let info = station_info().unwrap();
        let nrmn = info.get(&stid("nrmn")).unwrap();
        assert_eq!(nrmn.stid, stid("NRMN"));
        assert!((nrmn.lat - 35.23611).abs() < 1e-9);
        assert!((nrmn.lon - -97.46490).abs() < 1e-9);
        assert!(info.get(&stid("ZZZZ")).is_none());
    }

    #[test]
    fn every_station_is_in_oklahoma() {
        let info = station_info().unwrap();
        for s in info.stations() {
            assert!((33.0..37.5).contains(&s.lat), "{} lat {}", s.stid, s.lat);
            assert!((-103.5..-94.0).contains(&s.lon), "{} lon {}", s.stid, s.lon);
        }
    }

    #[test]
    fn bad_coordinate_is_parse_error() {
        let text = "stnm,stid,name,city,rang,cdir,cnty,nlat,elon\n1,ACME,Acme,Rush Springs,4.0,W,Grady,north,-98.0\n";
        let err = StationInfo::parse(text, 1).unwrap_err();
        match err {
            StationInfoError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert_eq!(message, "invalid latitude 'north'");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn short_record_is_parse_error() {
        let err = StationInfo::parse("1,ACME,Acme\n", 0).unwrap_err();
        assert!(matches!(err, StationInfoError::Parse { .. }));
        assert!(err.to_string().contains("missing latitude column"));
    }

    #[test]
    fn locate_rows() {
        let text = "a\nb\nSTID TAIR\nNRMN 23.7\nXXXX 20.1\nACME 25.3\n";
        let table = read_table_bytes(text.as_bytes(), &ReadOptions::default()).unwrap();
        let info = station_info().unwrap();

        let located = info.locate(&table).unwrap();
        assert_eq!(located.len(), 3);
        assert_eq!(located[0].map(|s| s.stid), Some(stid("NRMN")));
        assert!(located[1].is_none());
        assert_eq!(located[2].map(|s| s.stid), Some(stid("ACME")));
    }

    #[test]
    fn locate_needs_station_column() {
        let text = "a\nb\nTIME TAIR\n0 23.7\n";
        let table = read_table_bytes(text.as_bytes(), &ReadOptions::default()).unwrap();
        let err = station_info().unwrap().locate(&table).unwrap_err();
        assert!(matches!(err, StationInfoError::MissingStationColumn));
    }
}
