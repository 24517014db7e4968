//! Error types for the reshape/align/join stages.

use chrono::NaiveDate;
use outbreak_model::Location;
use thiserror::Error;

/// Errors raised while transforming snapshots. All are fatal for the run.
#[derive(Debug, Error)]
pub enum TransformError {
    /// An identity column the layout names is absent from the snapshot.
    #[error("malformed schema: expected column '{column}' is missing")]
    MalformedSchema { column: String },

    /// A column treated as a date has a header that does not parse.
    #[error("column '{column}' is not a date in format '{format}': {source}")]
    DateParse {
        column: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A count cell is null, negative or not an integer.
    #[error("invalid count '{value}' in column '{column}' at row {row}")]
    InvalidCount {
        column: String,
        row: usize,
        value: String,
    },

    /// The deaths table holds more than one row for a (location, date).
    #[error("ambiguous join key: more than one deaths row for {location} on {date}")]
    AmbiguousJoinKey { location: Location, date: NaiveDate },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_schema_display() {
        let err = TransformError::MalformedSchema {
            column: "Country/Region".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed schema: expected column 'Country/Region' is missing"
        );
    }

    #[test]
    fn test_ambiguous_key_display() {
        let err = TransformError::AmbiguousJoinKey {
            location: Location::state("Canada", "Ontario"),
            date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "ambiguous join key: more than one deaths row for Canada / Ontario on 2020-03-01"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("x".into());
        let err: TransformError = polars_err.into();
        assert!(matches!(err, TransformError::DataFrame { .. }));
    }
}
