//! Load pipeline: fetch, reshape, align and join.
//!
//! # Stage Order
//!
//! 1. **confirmed** - fetch and reshape the confirmed snapshot
//! 2. **drop_states** - optionally remove sub-region rows (totals stay)
//! 3. **align** - rank each location relative to the threshold crossing
//! 4. **deaths** - fetch and reshape the deaths snapshot, left join
//! 5. **filter** - optionally keep countries that reach a minimum rank
//!
//! # Example
//!
//! ```ignore
//! use outbreak_core::LoadPipeline;
//! use outbreak_ingest::DirectorySource;
//! use outbreak_model::LoadOptions;
//!
//! let source = DirectorySource::new("data")?;
//! let rows = LoadPipeline::new(source).run(&LoadOptions::default())?;
//! ```

use std::collections::BTreeSet;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use outbreak_ingest::SnapshotSource;
use outbreak_model::{FinalRow, LoadOptions, MetricKind, ObservationRow};
use outbreak_transform::{SeriesJoiner, ThresholdAligner, TimeSeriesReshaper, final_rows_to_frame};

use crate::error::Result;

/// Runs every stage against one [`SnapshotSource`].
#[derive(Debug, Clone)]
pub struct LoadPipeline<S> {
    source: S,
}

impl<S: SnapshotSource> LoadPipeline<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and reshape a single metric into the long table.
    pub fn load_metric(
        &self,
        metric: MetricKind,
        options: &LoadOptions,
    ) -> Result<Vec<ObservationRow>> {
        let df = self.source.fetch_csv(metric.as_str())?;
        let rows = TimeSeriesReshaper::new(&options.layout).reshape(&df, metric)?;
        Ok(rows)
    }

    /// Run the full pipeline and return the joined rows.
    ///
    /// Output rows are grouped per location in [`outbreak_model::Location`]
    /// order, ascending by date inside each location.
    pub fn run(&self, options: &LoadOptions) -> Result<Vec<FinalRow>> {
        let run_span = info_span!(
            "load",
            source = %self.source.describe(),
            threshold = options.threshold,
            drop_states = options.drop_states
        );
        let _run_guard = run_span.enter();
        let run_start = Instant::now();

        let confirmed = info_span!("confirmed").in_scope(|| -> Result<_> {
            let start = Instant::now();
            let rows = self.load_metric(MetricKind::Confirmed, options)?;
            debug!(
                rows = rows.len(),
                duration_ms = start.elapsed().as_millis(),
                "confirmed reshaped"
            );
            Ok(rows)
        })?;

        let confirmed = if options.drop_states {
            info_span!("drop_states").in_scope(|| {
                let before = confirmed.len();
                let kept = drop_states(confirmed);
                debug!(before, after = kept.len(), "dropped sub-region rows");
                kept
            })
        } else {
            confirmed
        };

        let aligned = info_span!("align")
            .in_scope(|| ThresholdAligner::new(options.threshold).align(confirmed));

        let joined = info_span!("deaths").in_scope(|| -> Result<_> {
            let start = Instant::now();
            let deaths = self.load_metric(MetricKind::Deaths, options)?;
            let joined = SeriesJoiner::new(options.p_crit).join(aligned, &deaths)?;
            debug!(
                death_rows = deaths.len(),
                rows = joined.len(),
                duration_ms = start.elapsed().as_millis(),
                "deaths joined"
            );
            Ok(joined)
        })?;

        let rows = match options.filter_min_days_since_threshold {
            Some(min_days) => info_span!("filter", min_days).in_scope(|| {
                let before = joined.len();
                let kept = filter_min_days_since_threshold(joined, min_days);
                debug!(before, after = kept.len(), "filtered countries");
                kept
            }),
            None => joined,
        };

        info!(
            rows = rows.len(),
            duration_ms = run_start.elapsed().as_millis(),
            "load complete"
        );
        Ok(rows)
    }

    /// [`Self::run`] followed by conversion to the output DataFrame.
    pub fn run_frame(&self, options: &LoadOptions) -> Result<DataFrame> {
        let rows = self.run(options)?;
        Ok(final_rows_to_frame(&rows)?)
    }
}

/// Run the pipeline once against a borrowed source.
pub fn load_data<S: SnapshotSource>(source: &S, options: &LoadOptions) -> Result<Vec<FinalRow>> {
    LoadPipeline::new(source).run(options)
}

/// Remove rows carrying a sub-region. Synthesized totals and country-level
/// rows are kept.
pub fn drop_states(rows: Vec<ObservationRow>) -> Vec<ObservationRow> {
    rows.into_iter()
        .filter(|row| !row.location.has_state())
        .collect()
}

/// Keep every row of each country label that has at least one row with
/// `days_since_threshold >= min_days`.
///
/// Retention is by country label, so the sub-regions of "X" survive when
/// any "X" row qualifies, while "X (total)" is judged on its own rows.
pub fn filter_min_days_since_threshold(rows: Vec<FinalRow>, min_days: i64) -> Vec<FinalRow> {
    let retained: BTreeSet<String> = rows
        .iter()
        .filter(|row| row.days_since_threshold >= min_days)
        .map(|row| row.location.country_label())
        .collect();
    rows.into_iter()
        .filter(|row| retained.contains(&row.location.country_label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use outbreak_model::Location;

    fn final_row(location: &Location, rank: i64) -> FinalRow {
        FinalRow {
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
                + chrono::Days::new((rank + 10) as u64),
            location: location.clone(),
            confirmed: 100,
            critical_estimate: 5.0,
            days_since_threshold: rank,
            deaths: None,
        }
    }

    #[test]
    fn test_filter_excludes_countries_below_min() {
        let early = Location::country("Early");
        let late = Location::country("Late");
        let rows: Vec<FinalRow> = (-2..=3)
            .map(|rank| final_row(&early, rank))
            .chain((-2..=7).map(|rank| final_row(&late, rank)))
            .collect();

        let kept = filter_min_days_since_threshold(rows, 5);

        assert_eq!(kept.len(), 10);
        assert!(kept.iter().all(|row| row.location == late));
    }

    #[test]
    fn test_filter_retains_whole_country_label() {
        let ontario = Location::state("Canada", "Ontario");
        let quebec = Location::state("Canada", "Quebec");
        let total = Location::aggregate("Canada");
        let rows = vec![
            final_row(&ontario, 6),
            final_row(&quebec, -1),
            final_row(&total, 2),
        ];

        let kept = filter_min_days_since_threshold(rows, 5);

        let locations: Vec<&Location> = kept.iter().map(|row| &row.location).collect();
        assert_eq!(locations, vec![&ontario, &quebec]);
    }

    #[test]
    fn test_drop_states_keeps_totals() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let rows = vec![
            ObservationRow::new(date, Location::state("X", "A"), MetricKind::Confirmed, 1),
            ObservationRow::new(date, Location::aggregate("X"), MetricKind::Confirmed, 1),
            ObservationRow::new(date, Location::country("Y"), MetricKind::Confirmed, 1),
        ];

        let kept = drop_states(rows);

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|row| !row.location.has_state()));
    }
}
