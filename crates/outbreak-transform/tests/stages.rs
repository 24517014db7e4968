//! Integration tests running reshape → align → join on small snapshots.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use outbreak_model::{Location, MetricKind, SnapshotLayout};
use outbreak_transform::{
    SeriesJoiner, ThresholdAligner, TimeSeriesReshaper, TransformError, final_rows_to_frame,
};

fn snapshot(rows: &[(&str, Option<&str>, &[i64])], dates: &[&str]) -> DataFrame {
    let mut columns: Vec<Column> = vec![
        Series::new(
            "Province/State".into(),
            rows.iter().map(|row| row.1).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "Country/Region".into(),
            rows.iter().map(|row| row.0).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new("Lat".into(), vec![0.0f64; rows.len()]).into_column(),
        Series::new("Long".into(), vec![0.0f64; rows.len()]).into_column(),
    ];
    for (idx, name) in dates.iter().enumerate() {
        columns.push(
            Series::new(
                (*name).into(),
                rows.iter().map(|row| row.2[idx]).collect::<Vec<_>>(),
            )
            .into_column(),
        );
    }
    DataFrame::new(columns).unwrap()
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, m, d).unwrap()
}

#[test]
fn testland_series_aligns_on_threshold() {
    let layout = SnapshotLayout::default();
    let df = snapshot(
        &[("Testland", None, &[10, 50, 90, 120, 200])],
        &["3/1/20", "3/2/20", "3/3/20", "3/4/20", "3/5/20"],
    );

    let rows = TimeSeriesReshaper::new(&layout)
        .reshape(&df, MetricKind::Confirmed)
        .unwrap();
    let aligned = ThresholdAligner::default().align(rows);

    let ranks: Vec<i64> = aligned.iter().map(|row| row.days_since_threshold).collect();
    assert_eq!(ranks, vec![-3, -2, -1, 0, 1]);
}

#[test]
fn state_rows_sum_into_country_total() {
    let layout = SnapshotLayout::default();
    let df = snapshot(
        &[("X", Some("A"), &[100, 100]), ("X", Some("B"), &[50, 150])],
        &["3/1/20", "3/2/20"],
    );

    let rows = TimeSeriesReshaper::new(&layout)
        .reshape(&df, MetricKind::Confirmed)
        .unwrap();

    let totals: Vec<(NaiveDate, u64)> = rows
        .iter()
        .filter(|row| row.location == Location::aggregate("X"))
        .map(|row| (row.date, row.value))
        .collect();
    assert_eq!(totals, vec![(date(3, 1), 150), (date(3, 2), 250)]);
    assert_eq!(rows.len(), 6);
    // per-state rows are kept alongside the totals
    assert_eq!(
        rows.iter().filter(|row| row.location.has_state()).count(),
        4
    );
}

#[test]
fn hong_kong_promoted_regardless_of_parent() {
    let layout = SnapshotLayout::default();
    let df = snapshot(
        &[
            ("China", Some("Hong Kong"), &[120]),
            ("Elsewhere", Some("Hong Kong"), &[3]),
        ],
        &["3/1/20"],
    );

    // Both rows collapse onto the same location, which is a duplicate key
    // for the join but still reshapes.
    let rows = TimeSeriesReshaper::new(&layout)
        .reshape(&df, MetricKind::Deaths)
        .unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.location, Location::country("Hong Kong"));
    }

    let confirmed = TimeSeriesReshaper::new(&layout)
        .reshape(
            &snapshot(&[("China", Some("Hong Kong"), &[120])], &["3/1/20"]),
            MetricKind::Confirmed,
        )
        .unwrap();
    let aligned = ThresholdAligner::default().align(confirmed);
    let err = SeriesJoiner::default().join(aligned, &rows).unwrap_err();
    assert!(matches!(err, TransformError::AmbiguousJoinKey { .. }));
}

#[test]
fn join_is_left_preserving_across_stages() {
    let layout = SnapshotLayout::default();
    let dates = ["3/1/20", "3/2/20", "3/3/20"];
    let confirmed = snapshot(
        &[
            ("Italy", None, &[80, 150, 300]),
            ("Canada", Some("Ontario"), &[20, 60, 110]),
            ("Canada", Some("Quebec"), &[30, 70, 140]),
        ],
        &dates,
    );
    // deaths file lags one location behind
    let deaths = snapshot(&[("Italy", None, &[1, 2, 5])], &dates);

    let reshaper = TimeSeriesReshaper::new(&layout);
    let confirmed_rows = reshaper.reshape(&confirmed, MetricKind::Confirmed).unwrap();
    let death_rows = reshaper.reshape(&deaths, MetricKind::Deaths).unwrap();
    let aligned = ThresholdAligner::default().align(confirmed_rows);
    let aligned_len = aligned.len();

    let joiner = SeriesJoiner::new(0.05);
    let joined = joiner.join(aligned, &death_rows).unwrap();

    assert_eq!(joined.len(), aligned_len);
    assert_eq!(joined.len(), 12);
    for row in &joined {
        assert_eq!(row.critical_estimate, row.confirmed as f64 * 0.05);
        if row.location == Location::country("Italy") {
            assert!(row.deaths.is_some());
        } else {
            assert_eq!(row.deaths, None);
        }
    }

    let canada_total: Vec<i64> = joined
        .iter()
        .filter(|row| row.location == Location::aggregate("Canada"))
        .map(|row| row.days_since_threshold)
        .collect();
    assert_eq!(canada_total, vec![-1, 0, 1]);

    let df = final_rows_to_frame(&joined).unwrap();
    assert_eq!(df.height(), 12);
}

#[test]
fn empty_snapshot_yields_empty_frame_with_columns() {
    let layout = SnapshotLayout::default();
    let df = snapshot(&[], &["3/1/20"]);

    let rows = TimeSeriesReshaper::new(&layout)
        .reshape(&df, MetricKind::Confirmed)
        .unwrap();
    let aligned = ThresholdAligner::default().align(rows);
    let joined = SeriesJoiner::default().join(aligned, &[]).unwrap();
    let frame = final_rows_to_frame(&joined).unwrap();

    assert_eq!(frame.height(), 0);
    assert!(frame.column("days_since_threshold").is_ok());
}
