//! Left join of aligned confirmed rows with deaths, plus the critical-case
//! estimate.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::NaiveDate;
use outbreak_model::{AlignedRow, DEFAULT_P_CRIT, FinalRow, Location, ObservationRow};

use crate::error::{Result, TransformError};

/// Joins deaths onto aligned confirmed rows and derives `critical_estimate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesJoiner {
    p_crit: f64,
}

impl Default for SeriesJoiner {
    fn default() -> Self {
        Self::new(DEFAULT_P_CRIT)
    }
}

impl SeriesJoiner {
    pub fn new(p_crit: f64) -> Self {
        Self { p_crit }
    }

    pub fn p_crit(&self) -> f64 {
        self.p_crit
    }

    /// Left join on (location, date). Every aligned row yields exactly one
    /// output row, in the same order; unmatched rows get `deaths = None`.
    ///
    /// Location equality includes the absent sub-region and the aggregate
    /// tag, so a country-level row only matches the country-level deaths row.
    ///
    /// # Errors
    ///
    /// [`TransformError::AmbiguousJoinKey`] when the deaths side holds more
    /// than one row for the same (location, date).
    pub fn join(&self, aligned: Vec<AlignedRow>, deaths: &[ObservationRow]) -> Result<Vec<FinalRow>> {
        let index = index_deaths(deaths)?;

        let mut matched = 0usize;
        let joined: Vec<FinalRow> = aligned
            .into_iter()
            .map(|row| {
                let AlignedRow {
                    observation,
                    days_since_threshold,
                } = row;
                let deaths = index.get(&(&observation.location, observation.date)).copied();
                if deaths.is_some() {
                    matched += 1;
                }
                FinalRow {
                    date: observation.date,
                    critical_estimate: self.critical_estimate(observation.value),
                    confirmed: observation.value,
                    location: observation.location,
                    days_since_threshold,
                    deaths,
                }
            })
            .collect();

        tracing::debug!(
            rows = joined.len(),
            matched,
            unmatched = joined.len() - matched,
            "joined deaths"
        );
        Ok(joined)
    }

    /// `confirmed * p_crit`.
    pub fn critical_estimate(&self, confirmed: u64) -> f64 {
        confirmed as f64 * self.p_crit
    }
}

fn index_deaths(deaths: &[ObservationRow]) -> Result<HashMap<(&Location, NaiveDate), u64>> {
    let mut index = HashMap::with_capacity(deaths.len());
    for row in deaths {
        match index.entry((&row.location, row.date)) {
            Entry::Occupied(_) => {
                return Err(TransformError::AmbiguousJoinKey {
                    location: row.location.clone(),
                    date: row.date,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(row.value);
            }
        }
    }
    Ok(index)
}
