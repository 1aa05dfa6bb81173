//! Reader configuration.

/// Lines preceding the column-name line in every Mesonet data file.
pub const DEFAULT_HEADER_LINES: usize = 2;

/// Options controlling how a data file is read.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Fields to materialise, in output order. `None` reads every column.
    pub fields: Option<Vec<String>>,

    /// Rename columns to their human-readable aliases.
    pub rename_fields: bool,

    /// Lines skipped before the column-name line.
    pub header_lines: usize,
}

impl ReadOptions {
    /// Read every column with native names.
    pub fn new() -> Self {
        Self {
            fields: None,
            rename_fields: false,
            header_lines: DEFAULT_HEADER_LINES,
        }
    }

    /// Only read these fields (case-insensitive), in this order.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Rename columns to human-readable aliases where one exists.
    pub fn with_rename_fields(mut self, rename: bool) -> Self {
        self.rename_fields = rename;
        self
    }

    /// Override the number of leading lines to skip.
    pub fn with_header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}
