//! Mesonet data file reader.
//!
//! Parses the fixed whitespace-delimited format shared by snapshot and
//! time-series files into an [`ObservationTable`], optionally keeping only
//! some fields and renaming them to human-readable labels.

mod error;
mod infer;
mod options;
mod parse;
mod table;


pub use error::ReadError;
pub use infer::{AllText, ColumnInference, NumericFirst};
pub use options::{DEFAULT_HEADER_LINES, ReadOptions};
pub use parse::{read_table, read_table_bytes, read_table_path, read_table_with};
pub use table::{Column, ColumnData, ColumnType, ObservationTable, Value};
