//! CLI argument definitions for the outbreak loader.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use outbreak_cli::config::parse_p_crit;
use outbreak_model::MetricKind;

#[derive(Parser)]
#[command(
    name = "outbreak",
    version,
    about = "Reshape and align COVID-19 time-series snapshots",
    long_about = "Reshape the wide global time-series snapshots into a long table,\n\
                  align each location on the day its confirmed count reached a\n\
                  threshold, and join the deaths series."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write the aligned table as CSV.
    Align(AlignArgs),

    /// Write the long table for a single metric as CSV.
    Reshape(ReshapeArgs),
}

#[derive(Parser)]
pub struct AlignArgs {
    /// Directory holding the `time_series_covid19_<metric>_global.csv` files.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Output CSV path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON file with load options. Flags below override its values.
    #[arg(long = "config", value_name = "FILE.json")]
    pub config: Option<PathBuf>,

    /// Drop sub-region rows before alignment. Country totals are kept.
    #[arg(long = "drop-states")]
    pub drop_states: bool,

    /// Ratio of confirmed cases estimated to become critical.
    #[arg(long = "p-crit", value_name = "F", value_parser = parse_p_crit)]
    pub p_crit: Option<f64>,

    /// Keep only countries with at least one row at or beyond this rank.
    #[arg(long = "min-days", value_name = "N", allow_negative_numbers = true)]
    pub min_days: Option<i64>,

    /// Confirmed count that anchors `days_since_threshold` at zero.
    #[arg(long = "threshold", value_name = "N")]
    pub threshold: Option<u64>,

    /// Skip the per-location summary table.
    #[arg(long = "quiet-summary")]
    pub quiet_summary: bool,
}

#[derive(Parser)]
pub struct ReshapeArgs {
    /// Directory holding the `time_series_covid19_<metric>_global.csv` files.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Metric to reshape.
    #[arg(long = "metric", value_enum)]
    pub metric: MetricArg,

    /// Output CSV path (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON file with load options; only the snapshot layout is used.
    #[arg(long = "config", value_name = "FILE.json")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Confirmed,
    Deaths,
}

impl From<MetricArg> for MetricKind {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Confirmed => MetricKind::Confirmed,
            MetricArg::Deaths => MetricKind::Deaths,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
