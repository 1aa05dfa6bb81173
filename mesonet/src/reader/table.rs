//! Typed, labeled observation columns.

use std::fmt;

use serde::Serialize;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

/// Values of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnData {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
}

impl ColumnData {
    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
        }
    }

    /// Whether the column has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage type.
    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Text(_) => ColumnType::Text,
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Float(_) => ColumnType::Float,
        }
    }

    /// Value at `row`, if in range.
    pub fn get(&self, row: usize) -> Option<Value<'_>> {
        match self {
            ColumnData::Text(v) => v.get(row).map(|s| Value::Text(s)),
            ColumnData::Integer(v) => v.get(row).copied().map(Value::Integer),
            ColumnData::Float(v) => v.get(row).copied().map(Value::Float),
        }
    }

    /// Text values, if this is a text column.
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Values as `f64`, widening integers. `None` for text columns.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            ColumnData::Text(_) => None,
            ColumnData::Integer(v) => Some(v.iter().map(|&x| x as f64).collect()),
            ColumnData::Float(v) => Some(v.clone()),
        }
    }
}

/// A single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.pad(s),
            Value::Integer(i) => fmt::Display::fmt(i, f),
            Value::Float(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

/// Observations as named, typed columns with one row per sample.
///
/// All columns have the same length. Column order is the order the caller
/// requested, or file order when every column was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationTable {
    columns: Vec<Column>,
    #[serde(skip)]
    rows: usize,
}

impl ObservationTable {
    /// Assemble a table from columns of equal length.
    ///
    /// Returns `None` if the lengths differ.
    pub fn new(columns: Vec<Column>) -> Option<Self> {
        let rows = columns.first().map_or(0, |c| c.data.len());
        if columns.iter().any(|c| c.data.len() != rows) {
            return None;
        }
        Some(Self { columns, rows })
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by exact name.
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.iter().find(|c| c.name == name).map(|c| &c.data)
    }

    /// Cell at (`row`, column `name`).
    pub fn value(&self, row: usize, name: &str) -> Option<Value<'_>> {
        self.column(name)?.get(row)
    }

    /// Take ownership of the columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

impl fmt::Display for ObservationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| {
                (0..self.rows)
                    .filter_map(|r| c.data.get(r))
                    .map(|v| v.to_string().len())
                    .chain(std::iter::once(c.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c.name, w = w))
            .collect();
        writeln!(f, "{}", header.join("  "))?;

        for row in 0..self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .filter_map(|(c, w)| c.data.get(row).map(|v| format!("{:>w$}", v, w = w)))
                .collect();
            writeln!(f, "{}", cells.join("  "))?;
        }

        Ok(())
    }
}
