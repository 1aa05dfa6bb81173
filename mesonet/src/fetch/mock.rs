//! Mock Mesonet data source for working without network access.
//!
//! Serves data files from a directory (or an in-memory map) keyed by the
//! filename the real service would be asked for, e.g. `20080812nrmn.mts`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::client::DataSource;
use super::error::FetchError;
use super::request::DataRequest;

/// Offline data source that serves pre-downloaded files.
#[derive(Debug, Default)]
pub struct MockMesonetClient {
    /// File contents keyed by filename.
    files: HashMap<String, Vec<u8>>,

    /// Number of fetches served or attempted.
    requests: AtomicUsize,
}

impl MockMesonetClient {
    /// Load every `.mdf` and `.mts` file in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, FetchError> {
        let mut files = HashMap::new();

        for entry in std::fs::read_dir(data_dir.as_ref())? {
            let path = entry?.path();
            let is_data_file = matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("mdf") | Some("mts")
            );
            if !path.is_file() || !is_data_file {
                continue;
            }

            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            files.insert(name.to_string(), std::fs::read(&path)?);
        }

        Ok(Self::from_files(files))
    }

    /// Serve the given filename → contents map.
    pub fn from_files(files: HashMap<String, Vec<u8>>) -> Self {
        Self {
            files,
            requests: AtomicUsize::new(0),
        }
    }

    /// Add or replace a file.
    pub fn with_file(mut self, filename: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(filename.into(), contents.into());
        self
    }

    /// Number of fetch calls made so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Filenames available, sorted.
    pub fn filenames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.files.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl DataSource for MockMesonetClient {
    fn fetch(&self, request: &DataRequest) -> Result<Vec<u8>, FetchError> {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let filename = request.filename();
        self.files
            .get(&filename)
            .cloned()
            .ok_or(FetchError::NotFound { filename })
    }
}
