//! Load options from a JSON file, overlaid with command-line flags.
//!
//! Precedence: flag > config file > built-in default.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use outbreak_model::LoadOptions;

/// Flag values that override the config file when present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptionOverrides {
    /// `--drop-states` can only switch dropping on.
    pub drop_states: bool,
    pub p_crit: Option<f64>,
    pub min_days_since_threshold: Option<i64>,
    pub threshold: Option<u64>,
}

impl OptionOverrides {
    #[must_use]
    pub fn apply(&self, mut options: LoadOptions) -> LoadOptions {
        if self.drop_states {
            options.drop_states = true;
        }
        if let Some(p_crit) = self.p_crit {
            options.p_crit = p_crit;
        }
        if let Some(days) = self.min_days_since_threshold {
            options.filter_min_days_since_threshold = Some(days);
        }
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        options
    }
}

/// Read [`LoadOptions`] from a JSON file. Missing keys take their defaults.
pub fn read_options_file(path: &Path) -> Result<LoadOptions> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let options: LoadOptions = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse config from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(options)
}

/// Resolve the effective options for a run.
pub fn resolve_options(config: Option<&Path>, overrides: &OptionOverrides) -> Result<LoadOptions> {
    let base = match config {
        Some(path) => read_options_file(path)?,
        None => LoadOptions::default(),
    };
    let options = overrides.apply(base);
    check_p_crit(options.p_crit)
        .map_err(anyhow::Error::msg)
        .context("invalid p_crit in config")?;
    Ok(options)
}

/// clap value parser for `--p-crit`: a finite, non-negative number.
pub fn parse_p_crit(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    check_p_crit(parsed)?;
    Ok(parsed)
}

fn check_p_crit(value: f64) -> std::result::Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{value} must be finite and non-negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_model::DEFAULT_THRESHOLD;

    #[test]
    fn test_parse_p_crit() {
        assert_eq!(parse_p_crit("0.1"), Ok(0.1));
        assert_eq!(parse_p_crit(" 0 "), Ok(0.0));
        assert!(parse_p_crit("-0.5").is_err());
        assert!(parse_p_crit("inf").is_err());
        assert!(parse_p_crit("NaN").is_err());
        assert!(parse_p_crit("lots").is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let base = LoadOptions::default()
            .with_p_crit(0.2)
            .with_min_days_since_threshold(Some(3));
        let overrides = OptionOverrides {
            p_crit: Some(0.07),
            threshold: Some(50),
            ..OptionOverrides::default()
        };

        let options = overrides.apply(base);

        assert_eq!(options.p_crit, 0.07);
        assert_eq!(options.threshold, 50);
        assert_eq!(options.filter_min_days_since_threshold, Some(3));
        assert!(!options.drop_states);
    }

    #[test]
    fn test_drop_states_flag_does_not_clear_config() {
        let base = LoadOptions::default().with_drop_states(true);

        let options = OptionOverrides::default().apply(base);

        assert!(options.drop_states);
    }

    #[test]
    fn test_resolve_without_config() {
        let options = resolve_options(None, &OptionOverrides::default()).unwrap();

        assert_eq!(options, LoadOptions::default());
        assert_eq!(options.threshold, DEFAULT_THRESHOLD);
    }
}
