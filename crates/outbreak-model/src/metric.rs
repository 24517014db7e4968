//! Metric kinds carried by the published time series.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A cumulative count series published as its own snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Confirmed,
    Deaths,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::Confirmed, MetricKind::Deaths];

    /// Lowercased metric name. Used both as the row tag and as the snapshot
    /// name handed to the source.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "deaths" => Ok(Self::Deaths),
            _ => Err(ModelError::UnknownMetric(s.to_string())),
        }
    }
}
