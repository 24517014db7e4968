//! Shared utilities for the outbreak workspace.
//!
//! This crate provides the Polars `AnyValue` helpers used when reading
//! identity cells and cumulative counts out of a raw snapshot.

pub mod polars;

pub use crate::polars::{any_to_count, any_to_string, any_to_string_non_empty, parse_count};
