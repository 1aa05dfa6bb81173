//! Mesonet data file parsing.
//!
//! Layout of every file:
//!
//! ```text
//!   101 ! (c) 2008 Oklahoma Climatological Survey - all rights reserved
//!   20 2008 08 12 00 00 00
//!  STID  STNM  TIME   RELH   TAIR   WSPD ...
//!  NRMN   104     0     86   23.7    1.9 ...
//! ```
//!
//! Two lines to skip, one line of column names, then whitespace delimited
//! rows aligned to those names. Sentinel values (e.g. `-996` for a reading
//! not yet collected) are returned as-is; no masking is applied.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::domain::{FieldName, alias_name};

use super::error::ReadError;
use super::infer::{ColumnInference, NumericFirst};
use super::options::ReadOptions;
use super::table::{Column, ObservationTable};

/// A file column selected for output.
struct Selected {
    /// Position in the file's column list.
    index: usize,
    /// Name the column is given in the output table.
    name: String,
}

/// Read a data file from any buffered reader using the default inference.
pub fn read_table<R: BufRead>(reader: R, options: &ReadOptions) -> Result<ObservationTable, ReadError> {
    read_table_with(reader, options, &NumericFirst)
}

/// Read a data file from disk.
pub fn read_table_path(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<ObservationTable, ReadError> {
    let file = File::open(path.as_ref())?;
    read_table(BufReader::new(file), options)
}

/// Read a data file already held in memory.
pub fn read_table_bytes(bytes: &[u8], options: &ReadOptions) -> Result<ObservationTable, ReadError> {
    read_table(bytes, options)
}

/// Read a data file, typing columns with the given strategy.
pub fn read_table_with<R, I>(
    reader: R,
    options: &ReadOptions,
    inference: &I,
) -> Result<ObservationTable, ReadError>
where
    R: BufRead,
    I: ColumnInference + ?Sized,
{
    // Validate the request before touching the input. An empty field list
    // reads every column.
    let requested = options
        .fields
        .as_ref()
        .filter(|fields| !fields.is_empty())
        .map(|fields| {
            fields
                .iter()
                .map(|f| FieldName::parse(f))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    let mut lines = reader.split(b'\n').enumerate().map(|(i, line)| (i + 1, line));

    for skipped in 0..options.header_lines {
        match lines.next() {
            Some((_, line)) => {
                line?;
            }
            None => {
                return Err(ReadError::Parse {
                    line: skipped + 1,
                    message: "file ends before column names".to_string(),
                });
            }
        }
    }

    let header_line = options.header_lines + 1;
    let names: Vec<String> = match lines.next() {
        Some((_, line)) => decode_line(header_line, line?)?
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    };
    if names.is_empty() {
        return Err(ReadError::Parse {
            line: header_line,
            message: "missing column names".to_string(),
        });
    }

    let selected = select_columns(&names, requested.as_deref())?;
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); selected.len()];

    for (line_no, line) in lines {
        let line = decode_line(line_no, line?)?;
        if line.trim().is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != names.len() {
            return Err(ReadError::Parse {
                line: line_no,
                message: format!("expected {} values, found {}", names.len(), tokens.len()),
            });
        }

        for (column, sel) in raw.iter_mut().zip(&selected) {
            column.push(tokens[sel.index].to_string());
        }
    }

    let columns: Vec<Column> = selected
        .into_iter()
        .zip(raw)
        .map(|(sel, values)| {
            let data = inference.infer(&sel.name, values);
            let name = if options.rename_fields {
                alias_name(&sel.name)
            } else {
                sel.name
            };
            Column { name, data }
        })
        .collect();

    let table = ObservationTable::new(columns).ok_or_else(|| ReadError::Parse {
        line: header_line,
        message: "columns have differing lengths".to_string(),
    })?;

    debug!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "read observation table"
    );

    Ok(table)
}

/// Decode one raw line, dropping a trailing carriage return.
fn decode_line(line_no: usize, bytes: Vec<u8>) -> Result<String, ReadError> {
    let mut line = String::from_utf8(bytes).map_err(|_| ReadError::Parse {
        line: line_no,
        message: "invalid UTF-8".to_string(),
    })?;
    if line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Map requested fields to file columns, or select every column.
fn select_columns(
    names: &[String],
    requested: Option<&[FieldName]>,
) -> Result<Vec<Selected>, ReadError> {
    let Some(requested) = requested else {
        return Ok(names
            .iter()
            .enumerate()
            .map(|(index, name)| Selected {
                index,
                name: name.clone(),
            })
            .collect());
    };

    requested
        .iter()
        .map(|field| {
            names
                .iter()
                .position(|n| n.eq_ignore_ascii_case(field.as_str()))
                .map(|index| Selected {
                    index,
                    name: field.as_str().to_string(),
                })
                .ok_or_else(|| ReadError::UnknownField {
                    field: field.as_str().to_string(),
                    available: names.to_vec(),
                })
        })
        .collect()
}
