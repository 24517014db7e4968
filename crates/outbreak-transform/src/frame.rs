//! Conversion of row types into Polars DataFrames.
//!
//! Column order is fixed. The country column holds the plain country name;
//! synthesized totals are marked by `is_aggregate` rather than by a suffix.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use outbreak_model::{AlignedRow, FinalRow, Location, ObservationRow};

use crate::error::Result;

pub const DATE: &str = "date";
pub const COUNTRY: &str = "country";
pub const STATE: &str = "state";
pub const IS_AGGREGATE: &str = "is_aggregate";
pub const METRIC_KIND: &str = "metric_kind";
pub const VALUE: &str = "value";
pub const CONFIRMED: &str = "confirmed";
pub const CRITICAL_ESTIMATE: &str = "critical_estimate";
pub const DAYS_SINCE_THRESHOLD: &str = "days_since_threshold";
pub const DEATHS: &str = "deaths";

/// Columns of the reshaped long table.
pub const OBSERVATION_COLUMNS: [&str; 6] = [DATE, COUNTRY, STATE, IS_AGGREGATE, METRIC_KIND, VALUE];

/// Columns of the final joined table.
pub const FINAL_COLUMNS: [&str; 8] = [
    DATE,
    COUNTRY,
    STATE,
    IS_AGGREGATE,
    CONFIRMED,
    CRITICAL_ESTIMATE,
    DAYS_SINCE_THRESHOLD,
    DEATHS,
];

fn location_columns<'a>(
    dates: Vec<NaiveDate>,
    locations: impl Iterator<Item = &'a Location>,
) -> Vec<Column> {
    let mut countries = Vec::new();
    let mut states = Vec::new();
    let mut aggregates = Vec::new();
    for location in locations {
        countries.push(location.country.clone());
        states.push(location.state.clone());
        aggregates.push(location.is_aggregate);
    }
    vec![
        Series::new(DATE.into(), dates).into_column(),
        Series::new(COUNTRY.into(), countries).into_column(),
        Series::new(STATE.into(), states).into_column(),
        Series::new(IS_AGGREGATE.into(), aggregates).into_column(),
    ]
}

/// Long table: `date, country, state, is_aggregate, metric_kind, value`.
pub fn observations_to_frame(rows: &[ObservationRow]) -> Result<DataFrame> {
    let mut columns = location_columns(
        rows.iter().map(|row| row.date).collect(),
        rows.iter().map(|row| &row.location),
    );
    columns.push(
        Series::new(
            METRIC_KIND.into(),
            rows.iter()
                .map(|row| row.metric_kind.as_str())
                .collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(VALUE.into(), rows.iter().map(|row| row.value).collect::<Vec<_>>())
            .into_column(),
    );
    Ok(DataFrame::new(columns)?)
}

/// Long table plus `days_since_threshold`.
pub fn aligned_to_frame(rows: &[AlignedRow]) -> Result<DataFrame> {
    let observations: Vec<ObservationRow> = rows.iter().map(|row| row.observation.clone()).collect();
    let mut df = observations_to_frame(&observations)?;
    df.with_column(Series::new(
        DAYS_SINCE_THRESHOLD.into(),
        rows.iter()
            .map(|row| row.days_since_threshold)
            .collect::<Vec<_>>(),
    ))?;
    Ok(df)
}

/// Final table in [`FINAL_COLUMNS`] order.
///
/// An empty input still yields every column, typed, with zero rows.
pub fn final_rows_to_frame(rows: &[FinalRow]) -> Result<DataFrame> {
    let mut columns = location_columns(
        rows.iter().map(|row| row.date).collect(),
        rows.iter().map(|row| &row.location),
    );
    columns.push(
        Series::new(
            CONFIRMED.into(),
            rows.iter().map(|row| row.confirmed).collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            CRITICAL_ESTIMATE.into(),
            rows.iter()
                .map(|row| row.critical_estimate)
                .collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            DAYS_SINCE_THRESHOLD.into(),
            rows.iter()
                .map(|row| row.days_since_threshold)
                .collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            DEATHS.into(),
            rows.iter().map(|row| row.deaths).collect::<Vec<_>>(),
        )
        .into_column(),
    );
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_model::MetricKind;
    use polars::prelude::{AnyValue, DataType};

    fn final_row(location: Location, deaths: Option<u64>) -> FinalRow {
        FinalRow {
            date: NaiveDate::from_ymd_opt(2020, 3, 10).unwrap(),
            location,
            confirmed: 200,
            critical_estimate: 10.0,
            days_since_threshold: 2,
            deaths,
        }
    }

    #[test]
    fn test_final_frame_column_order() {
        let rows = vec![
            final_row(Location::country("Italy"), Some(5)),
            final_row(Location::aggregate("Canada"), None),
        ];

        let df = final_rows_to_frame(&rows).unwrap();

        let names: Vec<&str> = df.get_column_names().into_iter().map(|name| name.as_str()).collect();
        assert_eq!(names, FINAL_COLUMNS.to_vec());
        assert_eq!(df.height(), 2);
        assert_eq!(df.column(DATE).unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_final_frame_nulls() {
        let rows = vec![
            final_row(Location::country("Italy"), Some(5)),
            final_row(Location::aggregate("Canada"), None),
        ];

        let df = final_rows_to_frame(&rows).unwrap();

        assert_eq!(df.column(DEATHS).unwrap().null_count(), 1);
        assert_eq!(df.column(STATE).unwrap().null_count(), 2);
        assert_eq!(
            df.column(IS_AGGREGATE).unwrap().get(1).unwrap(),
            AnyValue::Boolean(true)
        );
    }

    #[test]
    fn test_empty_final_frame_keeps_columns() {
        let df = final_rows_to_frame(&[]).unwrap();

        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), FINAL_COLUMNS.len());
        assert_eq!(
            df.column(DAYS_SINCE_THRESHOLD).unwrap().dtype(),
            &DataType::Int64
        );
    }

    #[test]
    fn test_observation_frame() {
        let rows = vec![ObservationRow::new(
            NaiveDate::from_ymd_opt(2020, 1, 22).unwrap(),
            Location::state("China", "Hubei"),
            MetricKind::Deaths,
            17,
        )];

        let df = observations_to_frame(&rows).unwrap();

        let names: Vec<&str> = df.get_column_names().into_iter().map(|name| name.as_str()).collect();
        assert_eq!(names, OBSERVATION_COLUMNS.to_vec());
        assert_eq!(
            df.column(METRIC_KIND).unwrap().get(0).unwrap(),
            AnyValue::String("deaths")
        );
    }
}
