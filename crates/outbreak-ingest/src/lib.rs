//! Snapshot ingestion for outbreak time series.
//!
//! This crate provides the `fetch_csv` capability the pipeline consumes:
//!
//! - **SnapshotSource**: trait returning a raw wide DataFrame per metric name
//! - **DirectorySource**: reads the published `time_series_covid19_<name>_global.csv` files
//! - **InMemorySource**: serves DataFrames that were built or loaded elsewhere
//!
//! # Example
//!
//! ```ignore
//! use outbreak_ingest::{DirectorySource, SnapshotSource};
//!
//! let source = DirectorySource::new("data/csse_covid_19_time_series")?;
//! let confirmed = source.fetch_csv("confirmed")?;
//! ```

mod error;
mod reader;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{read_snapshot_csv, validate_encoding};

// === Sources ===
pub use source::{DirectorySource, InMemorySource, SnapshotSource, snapshot_file_name};
