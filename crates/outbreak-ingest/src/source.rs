//! Snapshot sources: where raw wide tables come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::reader::read_snapshot_csv;

/// Supplies raw wide snapshots by metric name (`confirmed`, `deaths`).
///
/// Retrieval and CSV parsing live behind this trait; the reshape pipeline
/// only ever sees the resulting DataFrame.
pub trait SnapshotSource {
    /// Fetch the raw snapshot registered under `name`.
    fn fetch_csv(&self, name: &str) -> Result<DataFrame>;

    /// Human-readable description of the source (for logging).
    fn describe(&self) -> String;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &S {
    fn fetch_csv(&self, name: &str) -> Result<DataFrame> {
        (**self).fetch_csv(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// File name of the published global snapshot for a metric.
///
/// # Examples
///
/// ```
/// use outbreak_ingest::snapshot_file_name;
///
/// assert_eq!(snapshot_file_name("confirmed"), "time_series_covid19_confirmed_global.csv");
/// ```
pub fn snapshot_file_name(name: &str) -> String {
    format!("time_series_covid19_{name}_global.csv")
}

/// Reads snapshots from a local directory holding the published CSV files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::DirectoryNotFound`] when `dir` is not a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(IngestError::DirectoryNotFound { path: dir });
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the snapshot `name` is expected at.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.dir.join(snapshot_file_name(name))
    }
}

impl SnapshotSource for DirectorySource {
    fn fetch_csv(&self, name: &str) -> Result<DataFrame> {
        let path = self.snapshot_path(name);
        tracing::debug!(snapshot = name, path = %path.display(), "fetching snapshot");
        read_snapshot_csv(&path)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.dir.display())
    }
}

/// Holds snapshots already loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    snapshots: HashMap<String, DataFrame>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a snapshot under `name`, replacing any previous one.
    #[must_use]
    pub fn with_snapshot(mut self, name: impl Into<String>, df: DataFrame) -> Self {
        self.snapshots.insert(name.into(), df);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, df: DataFrame) {
        self.snapshots.insert(name.into(), df);
    }
}

impl SnapshotSource for InMemorySource {
    fn fetch_csv(&self, name: &str) -> Result<DataFrame> {
        self.snapshots
            .get(name)
            .cloned()
            .ok_or_else(|| IngestError::SnapshotNotFound {
                name: name.to_string(),
            })
    }

    fn describe(&self) -> String {
        format!("in-memory ({} snapshots)", self.snapshots.len())
    }
}
