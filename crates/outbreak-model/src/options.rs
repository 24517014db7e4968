//! Configuration options for loading and aligning snapshots.

use serde::{Deserialize, Serialize};

/// Default ratio of confirmed cases estimated to become critical.
pub const DEFAULT_P_CRIT: f64 = 0.05;

/// Default cumulative count that anchors `days_since_threshold`.
pub const DEFAULT_THRESHOLD: u64 = 100;

/// Header format of the date columns (`1/22/20`).
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%y";

/// Column naming and special cases of a wide snapshot file.
///
/// Defaults match the published global time-series files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotLayout {
    pub country_column: String,
    pub state_column: String,
    pub latitude_column: String,
    pub longitude_column: String,
    /// chrono format string for date column headers.
    pub date_format: String,
    /// Sub-regions reported as top-level locations in their own right.
    pub promoted_states: Vec<String>,
}

impl Default for SnapshotLayout {
    fn default() -> Self {
        Self {
            country_column: "Country/Region".to_string(),
            state_column: "Province/State".to_string(),
            latitude_column: "Lat".to_string(),
            longitude_column: "Long".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            promoted_states: vec!["Hong Kong".to_string()],
        }
    }
}

impl SnapshotLayout {
    /// Names of the non-date columns, in the order they are validated.
    pub fn identity_columns(&self) -> [&str; 4] {
        [
            self.country_column.as_str(),
            self.state_column.as_str(),
            self.latitude_column.as_str(),
            self.longitude_column.as_str(),
        ]
    }

    pub fn is_identity_column(&self, name: &str) -> bool {
        self.identity_columns().contains(&name)
    }

    pub fn is_promoted(&self, state: &str) -> bool {
        self.promoted_states.iter().any(|promoted| promoted == state)
    }
}

/// Options controlling the reshape/align/join pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Drop sub-region rows before alignment. Synthesized totals are kept.
    pub drop_states: bool,

    /// Multiplier applied to confirmed counts for `critical_estimate`.
    pub p_crit: f64,

    /// Keep only countries with at least one row at or beyond this rank.
    pub filter_min_days_since_threshold: Option<i64>,

    /// Cumulative count that anchors rank zero.
    pub threshold: u64,

    pub layout: SnapshotLayout,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            drop_states: false,
            p_crit: DEFAULT_P_CRIT,
            filter_min_days_since_threshold: None,
            threshold: DEFAULT_THRESHOLD,
            layout: SnapshotLayout::default(),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_drop_states(mut self, drop_states: bool) -> Self {
        self.drop_states = drop_states;
        self
    }

    #[must_use]
    pub fn with_p_crit(mut self, p_crit: f64) -> Self {
        self.p_crit = p_crit;
        self
    }

    #[must_use]
    pub fn with_min_days_since_threshold(mut self, days: Option<i64>) -> Self {
        self.filter_min_days_since_threshold = days;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: SnapshotLayout) -> Self {
        self.layout = layout;
        self
    }
}
