//! Wide-to-long reshaping of a raw snapshot.
//!
//! A snapshot holds one row per (country, optional sub-region) with the
//! identity columns from [`SnapshotLayout`] and one cumulative count column
//! per calendar date. Reshaping produces:
//!
//! 1. one [`ObservationRow`] per (source row, date column), in source row
//!    order then date column order, with promoted sub-regions rewritten to
//!    top-level locations;
//! 2. one synthesized country total per (country, date) for every country
//!    reporting at sub-region level, ordered by country then date.
//!
//! Latitude and longitude are validated as part of the schema and then
//! dropped.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::{AnyValue, Column, DataFrame};

use outbreak_common::{any_to_count, any_to_string, any_to_string_non_empty};
use outbreak_model::{Location, MetricKind, ObservationRow, SnapshotLayout};

use crate::error::{Result, TransformError};

/// A value column of the snapshot together with the date its header names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumn {
    pub name: String,
    pub date: NaiveDate,
}

/// Converts wide snapshots into long observation rows.
#[derive(Debug, Clone, Copy)]
pub struct TimeSeriesReshaper<'a> {
    layout: &'a SnapshotLayout,
}

impl<'a> TimeSeriesReshaper<'a> {
    pub fn new(layout: &'a SnapshotLayout) -> Self {
        Self { layout }
    }

    /// Reshape one snapshot: unpivot, promote, then append country totals.
    ///
    /// # Errors
    ///
    /// - [`TransformError::MalformedSchema`] when an identity column is missing
    /// - [`TransformError::DateParse`] when a non-identity header is not a date
    /// - [`TransformError::InvalidCount`] when a cell is not a non-negative integer
    pub fn reshape(&self, snapshot: &DataFrame, metric: MetricKind) -> Result<Vec<ObservationRow>> {
        let span = tracing::debug_span!("reshape", metric = %metric);
        let _guard = span.enter();

        let mut rows = self.unpivot(snapshot, metric)?;
        let totals = aggregate_states(&rows);
        tracing::debug!(
            observations = rows.len(),
            aggregates = totals.len(),
            "reshaped snapshot"
        );
        rows.extend(totals);
        Ok(rows)
    }

    /// Unpivot the date columns into one row per (source row, date).
    ///
    /// Promoted sub-regions are rewritten here; no totals are added.
    pub fn unpivot(&self, snapshot: &DataFrame, metric: MetricKind) -> Result<Vec<ObservationRow>> {
        self.check_identity_columns(snapshot)?;
        let date_columns = self.date_columns(snapshot)?;

        let countries = snapshot.column(&self.layout.country_column)?;
        let states = snapshot.column(&self.layout.state_column)?;
        let values = date_columns
            .iter()
            .map(|column| snapshot.column(&column.name))
            .collect::<std::result::Result<Vec<&Column>, _>>()?;

        let mut rows = Vec::with_capacity(snapshot.height() * date_columns.len());
        for idx in 0..snapshot.height() {
            let location = self.source_location(
                any_to_string(countries.get(idx)?),
                any_to_string_non_empty(states.get(idx)?),
            );
            for (column, series) in date_columns.iter().zip(&values) {
                let value = parse_cell(series.get(idx)?, &column.name, idx)?;
                rows.push(ObservationRow::new(
                    column.date,
                    location.clone(),
                    metric,
                    value,
                ));
            }
        }
        Ok(rows)
    }

    /// Every column that is not an identity column, parsed as a date.
    pub fn date_columns(&self, snapshot: &DataFrame) -> Result<Vec<DateColumn>> {
        snapshot
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .filter(|name| !self.layout.is_identity_column(name))
            .map(|name| {
                parse_date_header(name, &self.layout.date_format).map(|date| DateColumn {
                    name: name.to_string(),
                    date,
                })
            })
            .collect()
    }

    fn check_identity_columns(&self, snapshot: &DataFrame) -> Result<()> {
        for column in self.layout.identity_columns() {
            if snapshot.column(column).is_err() {
                return Err(TransformError::MalformedSchema {
                    column: column.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Build the location for a source row, lifting promoted sub-regions to
    /// the country level.
    pub fn source_location(&self, country: String, state: Option<String>) -> Location {
        match state {
            Some(state) if self.layout.is_promoted(&state) => Location::country(state),
            state => Location::new(country, state),
        }
    }
}

/// Parse a date column header with the layout's chrono format.
pub fn parse_date_header(name: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(name.trim(), format).map_err(|source| TransformError::DateParse {
        column: name.to_string(),
        format: format.to_string(),
        source,
    })
}

fn parse_cell(value: AnyValue<'_>, column: &str, row: usize) -> Result<u64> {
    if let Some(count) = any_to_count(value.clone()) {
        return Ok(count);
    }
    Err(TransformError::InvalidCount {
        column: column.to_string(),
        row,
        value: any_to_string(value),
    })
}

/// Sum sub-region rows into one total per (country, date, metric).
///
/// Rows without a sub-region (including promoted ones) do not contribute,
/// and countries without any sub-region rows get no total.
pub fn aggregate_states(rows: &[ObservationRow]) -> Vec<ObservationRow> {
    let mut totals: BTreeMap<(&str, NaiveDate, MetricKind), u64> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.location.has_state()) {
        let total = totals
            .entry((row.location.country.as_str(), row.date, row.metric_kind))
            .or_insert(0);
        *total = total.saturating_add(row.value);
    }
    totals
        .into_iter()
        .map(|((country, date, metric), value)| {
            ObservationRow::new(date, Location::aggregate(country), metric, value)
        })
        .collect()
}
