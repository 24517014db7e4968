//! Outbreak time-series transforms.
//!
//! This crate provides the stages that turn raw wide snapshots into the
//! aligned long table:
//!
//! - **reshape**: wide snapshot → long observations + synthesized country totals
//! - **align**: rank rows per location relative to a threshold crossing
//! - **join**: left join with deaths and the critical-case estimate
//! - **frame**: conversion of row types into Polars DataFrames

pub mod align;
pub mod error;
pub mod frame;
pub mod join;
pub mod reshape;

pub use align::{ThresholdAligner, partition_by, rank_from_threshold};
pub use error::{Result, TransformError};
pub use frame::{aligned_to_frame, final_rows_to_frame, observations_to_frame};
pub use join::SeriesJoiner;
pub use reshape::{TimeSeriesReshaper, aggregate_states, parse_date_header};
