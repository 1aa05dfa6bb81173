//! Mesonet field vocabulary.

use std::fmt;

/// Error returned when a field token is not part of the Mesonet vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field name: {token:?} is not a known Mesonet field")]
pub struct InvalidField {
    token: String,
}

impl InvalidField {
    /// The token that failed to parse, as given by the caller.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// A column of a Mesonet data file.
///
/// Field tokens are case-insensitive on input; the canonical form is the
/// uppercase code used in the file headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    /// Station identifier
    Stid,
    /// Station number
    Stnm,
    /// Minutes since 00 UTC
    Time,
    /// Relative humidity at 1.5 m
    Relh,
    /// Air temperature at 1.5 m
    Tair,
    /// Wind speed (scalar) at 10 m
    Wspd,
    /// Wind speed (vector) at 10 m
    Wvec,
    /// Wind direction at 10 m
    Wdir,
    /// Wind direction standard deviation
    Wdsd,
    /// Wind speed standard deviation
    Wssd,
    /// Highest 3-second wind speed
    Wmax,
    /// Rainfall since 00 UTC
    Rain,
    /// Station pressure
    Pres,
    /// Solar radiation
    Srad,
    /// Air temperature at 9 m
    Ta9m,
    /// Wind speed at 2 m
    Ws2m,
    /// Soil temperature under native vegetation at 10 cm
    Ts10,
    /// Soil temperature under bare soil at 10 cm
    Tb10,
    /// Soil temperature under native vegetation at 5 cm
    Ts05,
    /// Soil temperature under bare soil at 5 cm
    Tb05,
    /// Soil temperature under native vegetation at 30 cm
    Ts30,
    /// Calibrated change in temperature of soil at 5 cm
    Tr05,
    /// Calibrated change in temperature of soil at 25 cm
    Tr25,
    /// Calibrated change in temperature of soil at 60 cm
    Tr60,
    /// Calibrated change in temperature of soil at 75 cm
    Tr75,
}

impl FieldName {
    /// Every known field, in the order the network documents them.
    pub const ALL: [FieldName; 25] = [
        FieldName::Stid,
        FieldName::Stnm,
        FieldName::Time,
        FieldName::Relh,
        FieldName::Tair,
        FieldName::Wspd,
        FieldName::Wvec,
        FieldName::Wdir,
        FieldName::Wdsd,
        FieldName::Wssd,
        FieldName::Wmax,
        FieldName::Rain,
        FieldName::Pres,
        FieldName::Srad,
        FieldName::Ta9m,
        FieldName::Ws2m,
        FieldName::Ts10,
        FieldName::Tb10,
        FieldName::Ts05,
        FieldName::Tb05,
        FieldName::Ts30,
        FieldName::Tr05,
        FieldName::Tr25,
        FieldName::Tr60,
        FieldName::Tr75,
    ];

    /// Parse a field token, ignoring case and surrounding whitespace.
    pub fn parse(token: &str) -> Result<Self, InvalidField> {
        let upper = token.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == upper)
            .ok_or_else(|| InvalidField {
                token: token.to_string(),
            })
    }

    /// Returns the canonical uppercase code.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Stid => "STID",
            FieldName::Stnm => "STNM",
            FieldName::Time => "TIME",
            FieldName::Relh => "RELH",
            FieldName::Tair => "TAIR",
            FieldName::Wspd => "WSPD",
            FieldName::Wvec => "WVEC",
            FieldName::Wdir => "WDIR",
            FieldName::Wdsd => "WDSD",
            FieldName::Wssd => "WSSD",
            FieldName::Wmax => "WMAX",
            FieldName::Rain => "RAIN",
            FieldName::Pres => "PRES",
            FieldName::Srad => "SRAD",
            FieldName::Ta9m => "TA9M",
            FieldName::Ws2m => "WS2M",
            FieldName::Ts10 => "TS10",
            FieldName::Tb10 => "TB10",
            FieldName::Ts05 => "TS05",
            FieldName::Tb05 => "TB05",
            FieldName::Ts30 => "TS30",
            FieldName::Tr05 => "TR05",
            FieldName::Tr25 => "TR25",
            FieldName::Tr60 => "TR60",
            FieldName::Tr75 => "TR75",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FieldName {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical() {
        assert_eq!(FieldName::parse("TAIR").unwrap(), FieldName::Tair);
        assert_eq!(FieldName::parse("STID").unwrap(), FieldName::Stid);
        assert_eq!(FieldName::parse("TR75").unwrap(), FieldName::Tr75);
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(FieldName::parse("tair").unwrap(), FieldName::Tair);
        assert_eq!(FieldName::parse("Ta9m").unwrap(), FieldName::Ta9m);
        assert_eq!(FieldName::parse(" relh ").unwrap(), FieldName::Relh);
    }

    #[test]
    fn reject_unknown_tokens() {
        let err = FieldName::parse("TMAX").unwrap_err();
        assert_eq!(err.token(), "TMAX");
        assert!(FieldName::parse("").is_err());
        assert!(FieldName::parse("temperature").is_err());
    }

    #[test]
    fn error_display() {
        let err = FieldName::parse("dewp").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid field name: \"dewp\" is not a known Mesonet field"
        );
    }

    #[test]
    fn all_codes_are_distinct_and_uppercase() {
        let mut codes: Vec<&str> = FieldName::ALL.iter().map(FieldName::as_str).collect();
        assert!(codes.iter().all(|c| *c == c.to_ascii_uppercase()));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), FieldName::ALL.len());
    }
}
