//! Load pipeline for outbreak time series.
//!
//! Composes a [`outbreak_ingest::SnapshotSource`] with the reshape, alignment
//! and join stages from `outbreak-transform`.

pub mod error;
pub mod pipeline;

pub use error::{LoadError, Result};
pub use pipeline::{LoadPipeline, drop_states, filter_min_days_since_threshold, load_data};
