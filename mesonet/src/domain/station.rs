//! Station identifier type.

use std::fmt;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A valid 4-character Mesonet station identifier (e.g. `NRMN`, `ACME`).
///
/// Parsing is case-insensitive; the stored form is always uppercase. The
/// network's time-series filenames use the lowercase form, available via
/// [`StationId::to_lowercase`].
///
/// # Examples
///
/// ```
/// use mesonet::domain::StationId;
///
/// let nrmn = StationId::parse("nrmn").unwrap();
/// assert_eq!(nrmn.as_str(), "NRMN");
/// assert_eq!(nrmn.to_lowercase(), "nrmn");
///
/// // Wrong length is rejected
/// assert!(StationId::parse("NRM").is_err());
/// assert!(StationId::parse("NORMAN").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId([u8; 4]);

impl StationId {
    /// Parse a station id from a string.
    ///
    /// The input must be exactly 4 ASCII letters or digits, in any case.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let bytes = s.trim().as_bytes();

        if bytes.len() != 4 {
            return Err(InvalidStationId {
                reason: "must be exactly 4 characters",
            });
        }

        let mut id = [0u8; 4];
        for (slot, &b) in id.iter_mut().zip(bytes) {
            if !b.is_ascii_alphanumeric() {
                return Err(InvalidStationId {
                    reason: "must be ASCII letters or digits",
                });
            }
            *slot = b.to_ascii_uppercase();
        }

        Ok(StationId(id))
    }

    /// Returns the canonical (uppercase) id as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Returns the lowercase form used in time-series filenames.
    pub fn to_lowercase(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.as_str())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for StationId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl std::str::FromStr for StationId {
    type Err = InvalidStationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
