//! Column type inference.
//!
//! The file format carries no type information, so each materialised column
//! is typed once from its values. The strategy is a trait so callers can
//! force particular columns to a type.

use crate::domain::FieldName;

use super::table::ColumnData;

/// Strategy deciding the storage type of a column from its raw tokens.
pub trait ColumnInference {
    /// Convert the raw tokens of column `name` into typed data.
    fn infer(&self, name: &str, values: Vec<String>) -> ColumnData;
}

/// Default strategy: integer, then float, then text.
///
/// The station id column is always text, even for ids made only of digits.
/// An empty column is typed as float.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericFirst;

impl ColumnInference for NumericFirst {
    fn infer(&self, name: &str, values: Vec<String>) -> ColumnData {
        if FieldName::parse(name).is_ok_and(|f| f == FieldName::Stid) {
            return ColumnData::Text(values);
        }
        if values.is_empty() {
            return ColumnData::Float(Vec::new());
        }

        if let Some(ints) = parse_all::<i64>(&values) {
            return ColumnData::Integer(ints);
        }
        if let Some(floats) = parse_all::<f64>(&values) {
            return ColumnData::Float(floats);
        }
        ColumnData::Text(values)
    }
}

/// Strategy that keeps every column as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllText;

impl ColumnInference for AllText {
    fn infer(&self, _name: &str, values: Vec<String>) -> ColumnData {
        ColumnData::Text(values)
    }
}

fn parse_all<T: std::str::FromStr>(values: &[String]) -> Option<Vec<T>> {
    values.iter().map(|v| v.parse().ok()).collect()
}
