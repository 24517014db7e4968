//! Threshold alignment: rank each location's rows relative to the day its
//! cumulative count reached the threshold.
//!
//! Alignment is a rank, not a calendar delta. Within a partition sorted by
//! date, with `before` rows under the threshold and `after` rows at or above
//! it, the rows receive `-before, ..., -1, 0, 1, ..., after - 1`. Gaps in the
//! date sequence therefore never produce gaps in the index.
//!
//! For a non-decreasing cumulative series this puts zero on the first row at
//! or above the threshold. A series that dips back under the threshold still
//! gets a contiguous index, anchored by the counts rather than by the first
//! crossing.

use std::collections::BTreeMap;

use outbreak_model::{AlignedRow, DEFAULT_THRESHOLD, Location, ObservationRow};

/// Rank values in their given order relative to `threshold`.
///
/// # Examples
///
/// ```
/// use outbreak_transform::align::rank_from_threshold;
///
/// assert_eq!(rank_from_threshold(&[10, 50, 90, 120, 200], 100), vec![-3, -2, -1, 0, 1]);
/// assert_eq!(rank_from_threshold(&[150, 300], 100), vec![0, 1]);
/// assert_eq!(rank_from_threshold(&[1, 2], 100), vec![-2, -1]);
/// ```
pub fn rank_from_threshold(values: &[u64], threshold: u64) -> Vec<i64> {
    let before = values.iter().filter(|&&value| value < threshold).count() as i64;
    let len = values.len() as i64;
    (-before..len - before).collect()
}

/// Group items by key in a single pass. Partitions iterate in key order.
pub fn partition_by<T, K, F>(items: Vec<T>, key: F) -> BTreeMap<K, Vec<T>>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut partitions: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        partitions.entry(key(&item)).or_default().push(item);
    }
    partitions
}

/// Computes `days_since_threshold` per location partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdAligner {
    threshold: u64,
}

impl Default for ThresholdAligner {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ThresholdAligner {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Align rows partitioned by their full [`Location`].
    ///
    /// An absent sub-region is its own partition value, and a synthesized
    /// total never shares a partition with the real country row.
    pub fn align(&self, rows: Vec<ObservationRow>) -> Vec<AlignedRow> {
        self.align_by(rows, |row| row.location.clone())
    }

    /// Align rows partitioned by an arbitrary key.
    ///
    /// Output holds the partitions in key order, each sorted by date. Rows
    /// sharing a date inside one partition keep their input order.
    pub fn align_by<K, F>(&self, rows: Vec<ObservationRow>, key: F) -> Vec<AlignedRow>
    where
        K: Ord,
        F: Fn(&ObservationRow) -> K,
    {
        let total = rows.len();
        let partitions = partition_by(rows, key);
        let partition_count = partitions.len();

        let mut aligned = Vec::with_capacity(total);
        for mut group in partitions.into_values() {
            group.sort_by_key(|row| row.date);
            warn_on_duplicate_dates(&group);
            let values: Vec<u64> = group.iter().map(|row| row.value).collect();
            let ranks = rank_from_threshold(&values, self.threshold);
            aligned.extend(
                group
                    .into_iter()
                    .zip(ranks)
                    .map(|(observation, days_since_threshold)| AlignedRow {
                        observation,
                        days_since_threshold,
                    }),
            );
        }

        tracing::debug!(
            rows = aligned.len(),
            partitions = partition_count,
            threshold = self.threshold,
            "aligned partitions"
        );
        aligned
    }
}

fn warn_on_duplicate_dates(group: &[ObservationRow]) {
    let duplicates = group
        .windows(2)
        .filter(|pair| pair[0].date == pair[1].date)
        .count();
    if duplicates > 0 {
        let location: &Location = &group[0].location;
        tracing::warn!(
            location = %location,
            duplicates,
            "duplicate dates in partition; rank follows input order"
        );
    }
}
