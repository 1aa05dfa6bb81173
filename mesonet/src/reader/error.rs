//! Reader error types.

use crate::domain::InvalidField;

/// Errors that can occur when reading a Mesonet data file.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Requested field is not part of the Mesonet vocabulary
    #[error(transparent)]
    InvalidField(#[from] InvalidField),

    /// Requested field is valid but the file has no such column
    #[error("field {field} not present in file (columns: {})", .available.join(", "))]
    UnknownField {
        field: String,
        available: Vec<String>,
    },

    /// Content does not follow the expected layout
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
