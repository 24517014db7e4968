//! Location identity for observation rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display suffix appended to the country name of synthesized totals.
pub const AGGREGATE_SUFFIX: &str = " (total)";

/// A (country, optional sub-region) pair, optionally tagged as a synthesized
/// country total.
///
/// The aggregate tag is part of the identity: `Location::aggregate("Canada")`
/// never compares equal to a real country-level `Canada` row, even though
/// both render the same country name.
///
/// Field order matters for the derived `Ord`, which fixes the order in which
/// partitions are emitted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub state: Option<String>,
    #[serde(default)]
    pub is_aggregate: bool,
}

impl Location {
    pub fn new(country: impl Into<String>, state: Option<String>) -> Self {
        Self {
            country: country.into(),
            state,
            is_aggregate: false,
        }
    }

    /// A country-level location with no sub-region.
    pub fn country(country: impl Into<String>) -> Self {
        Self::new(country, None)
    }

    /// A sub-region location.
    pub fn state(country: impl Into<String>, state: impl Into<String>) -> Self {
        Self::new(country, Some(state.into()))
    }

    /// The synthesized total over all sub-regions of `country`.
    pub fn aggregate(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            state: None,
            is_aggregate: true,
        }
    }

    pub fn has_state(&self) -> bool {
        self.state.is_some()
    }

    /// Country name as shown to users, with the aggregate suffix when tagged.
    ///
    /// This is the key used when filtering "by country": a total and the real
    /// country row of the same name are distinct entries.
    pub fn country_label(&self) -> String {
        if self.is_aggregate {
            format!("{}{AGGREGATE_SUFFIX}", self.country)
        } else {
            self.country.clone()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            Some(state) => write!(f, "{} / {}", self.country_label(), state),
            None => f.write_str(&self.country_label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_label_is_suffixed() {
        assert_eq!(Location::aggregate("Canada").country_label(), "Canada (total)");
        assert_eq!(Location::country("Canada").country_label(), "Canada");
    }

    #[test]
    fn aggregate_is_distinct_from_literal_total_country() {
        let tagged = Location::aggregate("X");
        let literal = Location::country("X (total)");
        assert_eq!(tagged.country_label(), literal.country_label());
        assert_ne!(tagged, literal);
    }

    #[test]
    fn display_includes_state() {
        assert_eq!(Location::state("Australia", "Victoria").to_string(), "Australia / Victoria");
        assert_eq!(Location::aggregate("Australia").to_string(), "Australia (total)");
    }

    #[test]
    fn absent_state_sorts_before_named_states() {
        let mut locations = vec![
            Location::state("China", "Hubei"),
            Location::country("China"),
            Location::aggregate("China"),
        ];
        locations.sort();
        assert_eq!(locations[0], Location::country("China"));
        assert_eq!(locations[1], Location::aggregate("China"));
        assert_eq!(locations[2], Location::state("China", "Hubei"));
    }
}
