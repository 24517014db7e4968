//! CLI library components for the outbreak loader.

pub mod config;
pub mod logging;
pub mod output;
pub mod summary;
