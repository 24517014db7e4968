//! Error types for snapshot ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a raw snapshot.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Snapshot directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File starts with a byte-order mark for an encoding we cannot read.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === Source Errors ===
    /// Source has no snapshot registered under this name.
    #[error("no snapshot named '{name}'")]
    SnapshotNotFound { name: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/time_series_covid19_deaths_global.csv"),
        };
        assert_eq!(
            err.to_string(),
            "CSV file not found: /data/time_series_covid19_deaths_global.csv"
        );
    }

    #[test]
    fn test_snapshot_not_found_display() {
        let err = IngestError::SnapshotNotFound {
            name: "recovered".to_string(),
        };
        assert_eq!(err.to_string(), "no snapshot named 'recovered'");
    }
}
