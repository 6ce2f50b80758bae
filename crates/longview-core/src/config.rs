//! Configuration loading and typed config structures for the Longview forecast.
//!
//! The configuration lives in `longview-config.yaml` at the working
//! directory. Every field has a default, so an empty file (or no file at
//! all) runs the built-in scenario.

use std::path::Path;

use longview_world::{ModelCatalog, WorldError};
use serde::Deserialize;
use tracing::warn;

/// Environment variable overriding `scenario.horizon_years`.
pub const HORIZON_ENV: &str = "LONGVIEW_HORIZON_YEARS";

/// Environment variable overriding `scenario.acceleration_factor`.
pub const ACCELERATION_ENV: &str = "LONGVIEW_ACCELERATION";

/// Longest forecast horizon accepted, in years.
pub const MAX_HORIZON_YEARS: u32 = 10_000;

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A scenario or logging value is out of range.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong with the value.
        reason: String,
    },

    /// The model catalog failed validation.
    #[error("invalid model catalog: {source}")]
    Models {
        /// The underlying validation error.
        #[from]
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level forecast configuration.
///
/// Mirrors the structure of `longview-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LongviewConfig {
    /// Start year, horizon, and acceleration.
    #[serde(default)]
    pub scenario: ScenarioConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Candidate sub-models and their prior weights.
    #[serde(default)]
    pub models: ModelCatalog,
}

impl LongviewConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `LONGVIEW_HORIZON_YEARS` overrides `scenario.horizon_years`
    /// - `LONGVIEW_ACCELERATION` overrides `scenario.acceleration_factor`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.scenario.apply_env_overrides();
        Ok(config)
    }

    /// Check every value the forecast depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an out-of-range scenario or
    /// logging value and [`ConfigError::Models`] for a bad model catalog.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scenario.validate()?;
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "logging.level {:?} is not one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }
        self.models.validate()?;
        Ok(())
    }
}

/// The scenario being forecast.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScenarioConfig {
    /// Calendar year of the start state.
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Years to forecast past the start year.
    #[serde(default = "default_horizon_years")]
    pub horizon_years: u32,

    /// Hazard multiplier of the accelerated scenario.
    #[serde(default = "default_acceleration_factor")]
    pub acceleration_factor: f64,

    /// Years between report rows.
    #[serde(default = "default_report_interval_years")]
    pub report_interval_years: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            horizon_years: default_horizon_years(),
            acceleration_factor: default_acceleration_factor(),
            report_interval_years: default_report_interval_years(),
        }
    }
}

impl ScenarioConfig {
    /// Number of distributions in a run: the start year through the
    /// horizon year inclusive.
    pub fn steps(&self) -> usize {
        usize::try_from(self.horizon_years)
            .map_or(usize::MAX, |horizon| horizon.saturating_add(1))
    }

    /// Apply the `LONGVIEW_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(HORIZON_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(horizon) => self.horizon_years = horizon,
                Err(err) => {
                    warn!(variable = HORIZON_ENV, value = %raw, error = %err, "Ignoring override");
                }
            }
        }
        if let Some(raw) = lookup(ACCELERATION_ENV) {
            match raw.trim().parse::<f64>() {
                Ok(factor) => self.acceleration_factor = factor,
                Err(err) => {
                    warn!(
                        variable = ACCELERATION_ENV,
                        value = %raw,
                        error = %err,
                        "Ignoring override"
                    );
                }
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { reason })
        };
        if self.horizon_years == 0 || self.horizon_years > MAX_HORIZON_YEARS {
            return invalid(format!(
                "scenario.horizon_years {} must be between 1 and {MAX_HORIZON_YEARS}",
                self.horizon_years
            ));
        }
        let horizon = i32::try_from(self.horizon_years).unwrap_or(i32::MAX);
        if self.start_year.checked_add(horizon).is_none() {
            return invalid(format!(
                "scenario.start_year {} plus the horizon overflows",
                self.start_year
            ));
        }
        if self.report_interval_years == 0 {
            return invalid("scenario.report_interval_years must be positive".to_owned());
        }
        if !self.acceleration_factor.is_finite() || self.acceleration_factor < 0.0 {
            return invalid(format!(
                "scenario.acceleration_factor {} must be finite and non-negative",
                self.acceleration_factor
            ));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_start_year() -> i32 {
    2022
}

const fn default_horizon_years() -> u32 {
    100
}

const fn default_acceleration_factor() -> f64 {
    1.1
}

const fn default_report_interval_years() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LongviewConfig::default();
        assert_eq!(config.scenario.start_year, 2022);
        assert_eq!(config.scenario.horizon_years, 100);
        assert_eq!(config.scenario.report_interval_years, 10);
        assert!((config.scenario.acceleration_factor - 1.1).abs() < f64::EPSILON);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.models, ModelCatalog::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let yaml = r"
scenario:
  start_year: 2030
  report_interval_years: 5
logging:
  level: debug
";
        let mut config: LongviewConfig = serde_yml::from_str(yaml).unwrap();
        config.scenario.apply_overrides(|_| None);
        assert_eq!(config.scenario.start_year, 2030);
        assert_eq!(config.scenario.horizon_years, 100);
        assert_eq!(config.scenario.report_interval_years, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.models.agi.len(), 4);
    }

    #[test]
    fn parse_custom_models() {
        let yaml = r"
models:
  reference_year: 2025
  caps:
    agi: 0.8
  agi:
    - name: only
      weight: 1.0
      hazard:
        base_rate: 0.01
        doubling_years: 8.0
      heaven_midpoint_year: 2060.0
  nukes:
    - name: tense
      weight: 1.0
      hazard:
        base_rate: 0.01
      odds:
        dead: 1.0
        reset: 1.0
";
        let config = LongviewConfig::parse(yaml).unwrap();
        assert_eq!(config.models.reference_year, 2025);
        assert!((config.models.caps.agi - 0.8).abs() < f64::EPSILON);
        assert!((config.models.caps.nuke - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.models.agi.len(), 1);
        assert_eq!(config.models.nukes.len(), 1);
        assert_eq!(config.models.plagues.len(), 2);
        assert_eq!(config.models.ensemble_size(), 2);
        let agi = config.models.agi.first().unwrap();
        assert_eq!(agi.name, "only");
        assert!((agi.reset_weight - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config: LongviewConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config, LongviewConfig::default());
    }

    #[test]
    fn all_zero_odds_fail_to_parse() {
        let yaml = r"
models:
  nukes:
    - name: broken
      weight: 1.0
      hazard:
        base_rate: 0.01
      odds: {}
";
        assert!(matches!(
            LongviewConfig::parse(yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn overflowing_odds_fail_to_parse() {
        let yaml = r"
models:
  nukes:
    - name: runaway
      weight: 1.0
      hazard:
        base_rate: 0.05
      odds:
        dead: 1.0e308
        reset: 1.0e308
";
        assert!(matches!(
            LongviewConfig::parse(yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn overrides_replace_values() {
        let mut scenario = ScenarioConfig::default();
        scenario.apply_overrides(|key| match key {
            HORIZON_ENV => Some("50".to_owned()),
            ACCELERATION_ENV => Some(" 2.5 ".to_owned()),
            _ => None,
        });
        assert_eq!(scenario.horizon_years, 50);
        assert!((scenario.acceleration_factor - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn unparseable_overrides_are_ignored() {
        let mut scenario = ScenarioConfig::default();
        scenario.apply_overrides(|_| Some("lots".to_owned()));
        assert_eq!(scenario, ScenarioConfig::default());
    }

    #[test]
    fn validate_rejects_bad_scenarios() {
        let cases = [
            ScenarioConfig {
                horizon_years: 0,
                ..ScenarioConfig::default()
            },
            ScenarioConfig {
                horizon_years: MAX_HORIZON_YEARS.saturating_add(1),
                ..ScenarioConfig::default()
            },
            ScenarioConfig {
                report_interval_years: 0,
                ..ScenarioConfig::default()
            },
            ScenarioConfig {
                acceleration_factor: -1.0,
                ..ScenarioConfig::default()
            },
            ScenarioConfig {
                acceleration_factor: f64::NAN,
                ..ScenarioConfig::default()
            },
            ScenarioConfig {
                start_year: i32::MAX,
                ..ScenarioConfig::default()
            },
        ];
        for scenario in cases {
            let config = LongviewConfig {
                scenario,
                ..LongviewConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Invalid { .. })
            ));
        }
    }

    #[test]
    fn validate_rejects_unknown_log_level() {
        let config = LongviewConfig {
            logging: LoggingConfig {
                level: "loud".to_owned(),
            },
            ..LongviewConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_models() {
        let mut config = LongviewConfig::default();
        config.models.plagues.clear();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Models { .. })
        ));
    }

    #[test]
    fn steps_cover_start_through_horizon() {
        let scenario = ScenarioConfig::default();
        assert_eq!(scenario.steps(), 101);
        let short = ScenarioConfig {
            horizon_years: 1,
            ..ScenarioConfig::default()
        };
        assert_eq!(short.steps(), 2);
    }
}
