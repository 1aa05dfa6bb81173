//! Human-readable aliases for Mesonet field codes.
//!
//! Only a handful of fields have a standard name. Lookups for anything else
//! pass the input through unchanged, so renaming a whole header is total.

use super::FieldName;

/// The alias table. Both columns are unique, so the mapping inverts cleanly.
const ALIASES: [(FieldName, &str); 6] = [
    (FieldName::Tair, "temperature"),
    (FieldName::Relh, "relative humidity"),
    (FieldName::Wspd, "wind speed"),
    (FieldName::Wdir, "wind direction"),
    (FieldName::Rain, "rainfall"),
    (FieldName::Pres, "pressure"),
];

impl FieldName {
    /// Human-readable label for this field, if it has one.
    pub fn alias(&self) -> Option<&'static str> {
        ALIASES
            .iter()
            .find(|(field, _)| field == self)
            .map(|(_, label)| *label)
    }

    /// Field whose human-readable label is exactly `label`.
    pub fn from_alias(label: &str) -> Option<FieldName> {
        ALIASES
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(field, _)| *field)
    }
}

/// Map a native column name to its human-readable label.
///
/// The column name is matched case-insensitively. Names without an alias,
/// including names outside the field vocabulary, are returned unchanged.
pub fn alias_name(native: &str) -> String {
    FieldName::parse(native)
        .ok()
        .and_then(|field| field.alias())
        .map(str::to_string)
        .unwrap_or_else(|| native.to_string())
}

/// Map a human-readable label back to the canonical field code.
///
/// Labels without a field are returned unchanged.
pub fn native_name(label: &str) -> String {
    FieldName::from_alias(label)
        .map(|field| field.as_str().to_string())
        .unwrap_or_else(|| label.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliased_fields() {
        assert_eq!(FieldName::Tair.alias(), Some("temperature"));
        assert_eq!(FieldName::Relh.alias(), Some("relative humidity"));
        assert_eq!(FieldName::Pres.alias(), Some("pressure"));
        assert_eq!(FieldName::Stid.alias(), None);
        assert_eq!(FieldName::Ts10.alias(), None);
    }

    #[test]
    fn reverse_lookup() {
        assert_eq!(FieldName::from_alias("wind speed"), Some(FieldName::Wspd));
        assert_eq!(FieldName::from_alias("rainfall"), Some(FieldName::Rain));
        assert_eq!(FieldName::from_alias("dew point"), None);
    }

    #[test]
    fn alias_name_passes_through_unmapped() {
        assert_eq!(alias_name("TAIR"), "temperature");
        assert_eq!(alias_name("tair"), "temperature");
        assert_eq!(alias_name("STID"), "STID");
        assert_eq!(alias_name("DEWP"), "DEWP");
    }

    #[test]
    fn native_name_passes_through_unmapped() {
        assert_eq!(native_name("temperature"), "TAIR");
        assert_eq!(native_name("STID"), "STID");
        assert_eq!(native_name("humidity"), "humidity");
    }

    #[test]
    fn table_is_injective() {
        for (i, (field_a, label_a)) in ALIASES.iter().enumerate() {
            for (field_b, label_b) in &ALIASES[i + 1..] {
                assert_ne!(field_a, field_b);
                assert_ne!(label_a, label_b);
            }
        }
    }

    #[test]
    fn roundtrip_every_field() {
        for field in FieldName::ALL {
            assert_eq!(native_name(&alias_name(field.as_str())), field.as_str());
        }
    }
}
