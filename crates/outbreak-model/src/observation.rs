//! Row types produced by each pipeline stage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::metric::MetricKind;

/// One long-format observation: a cumulative count for a location on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRow {
    pub date: NaiveDate,
    pub location: Location,
    pub metric_kind: MetricKind,
    pub value: u64,
}

impl ObservationRow {
    pub fn new(date: NaiveDate, location: Location, metric_kind: MetricKind, value: u64) -> Self {
        Self {
            date,
            location,
            metric_kind,
            value,
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.location.is_aggregate
    }
}

/// An observation with its rank relative to the threshold-crossing row of
/// its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedRow {
    pub observation: ObservationRow,
    /// Negative before the threshold is reached, zero on the anchor row,
    /// positive after. A rank over date-sorted rows, not a calendar delta.
    pub days_since_threshold: i64,
}

/// Confirmed-case row joined with deaths and the derived critical estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRow {
    pub date: NaiveDate,
    pub location: Location,
    pub confirmed: u64,
    pub critical_estimate: f64,
    pub days_since_threshold: i64,
    pub deaths: Option<u64>,
}
