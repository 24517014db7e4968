//! Polars AnyValue utility functions.
//!
//! Snapshot CSVs are read with schema inference, so the same logical column
//! can arrive as an integer, a float or a string depending on its contents.
//! These helpers flatten that variety into the two shapes the reshaper needs:
//! trimmed labels and non-negative counts.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to a trimmed `String`.
///
/// Returns an empty string for `Null`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use outbreak_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::String(" Italy ")), "Italy");
/// assert_eq!(any_to_string(AnyValue::Int64(7)), "7");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        other => {
            let s = other.to_string();
            // Display wraps some string-like values in quotes
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].trim().to_string()
            } else {
                s
            }
        }
    }
}

/// Converts `AnyValue` to `String`, returning `None` if the result is empty.
///
/// Sub-region cells are blank for country-level rows; this maps them to an
/// absent state.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    if s.is_empty() { None } else { Some(s) }
}

/// Converts an `AnyValue` to a non-negative count.
///
/// Integers must be non-negative, floats must additionally be integral, and
/// strings must parse as an unsigned integer. Everything else (including
/// `Null`) yields `None`.
pub fn any_to_count(value: AnyValue<'_>) -> Option<u64> {
    match value {
        AnyValue::Int8(v) => u64::try_from(v).ok(),
        AnyValue::Int16(v) => u64::try_from(v).ok(),
        AnyValue::Int32(v) => u64::try_from(v).ok(),
        AnyValue::Int64(v) => u64::try_from(v).ok(),
        AnyValue::UInt8(v) => Some(u64::from(v)),
        AnyValue::UInt16(v) => Some(u64::from(v)),
        AnyValue::UInt32(v) => Some(u64::from(v)),
        AnyValue::UInt64(v) => Some(v),
        AnyValue::Float32(v) => float_to_count(f64::from(v)),
        AnyValue::Float64(v) => float_to_count(v),
        AnyValue::String(s) => parse_count(s),
        AnyValue::StringOwned(s) => parse_count(&s),
        _ => None,
    }
}

fn float_to_count(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 {
        Some(v as u64)
    } else {
        None
    }
}

/// Parses a string as a non-negative count, returning `None` for invalid or empty strings.
pub fn parse_count(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_trims() {
        assert_eq!(any_to_string(AnyValue::String("  Hubei ")), "Hubei");
    }

    #[test]
    fn test_any_to_string_non_empty() {
        assert_eq!(any_to_string_non_empty(AnyValue::Null), None);
        assert_eq!(any_to_string_non_empty(AnyValue::String("")), None);
        assert_eq!(any_to_string_non_empty(AnyValue::String("  ")), None);
        assert_eq!(
            any_to_string_non_empty(AnyValue::String("Hong Kong")),
            Some("Hong Kong".to_string())
        );
    }

    #[test]
    fn test_any_to_count_integers() {
        assert_eq!(any_to_count(AnyValue::Int64(120)), Some(120));
        assert_eq!(any_to_count(AnyValue::Int32(0)), Some(0));
        assert_eq!(any_to_count(AnyValue::UInt32(5)), Some(5));
        assert_eq!(any_to_count(AnyValue::Int64(-1)), None);
    }

    #[test]
    fn test_any_to_count_floats() {
        assert_eq!(any_to_count(AnyValue::Float64(42.0)), Some(42));
        assert_eq!(any_to_count(AnyValue::Float64(42.5)), None);
        assert_eq!(any_to_count(AnyValue::Float64(-3.0)), None);
        assert_eq!(any_to_count(AnyValue::Float64(f64::NAN)), None);
    }

    #[test]
    fn test_any_to_count_strings_and_null() {
        assert_eq!(any_to_count(AnyValue::String(" 17 ")), Some(17));
        assert_eq!(any_to_count(AnyValue::String("n/a")), None);
        assert_eq!(any_to_count(AnyValue::String("")), None);
        assert_eq!(any_to_count(AnyValue::Null), None);
    }
}
