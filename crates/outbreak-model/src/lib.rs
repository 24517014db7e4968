//! Data model for outbreak time-series alignment.
//!
//! Every type here is derived and immutable: a run rebuilds all rows from the
//! raw snapshots.

pub mod error;
pub mod location;
pub mod metric;
pub mod observation;
pub mod options;

pub use error::{ModelError, Result};
pub use location::{AGGREGATE_SUFFIX, Location};
pub use metric::MetricKind;
pub use observation::{AlignedRow, FinalRow, ObservationRow};
pub use options::{
    DEFAULT_DATE_FORMAT, DEFAULT_P_CRIT, DEFAULT_THRESHOLD, LoadOptions, SnapshotLayout,
};
