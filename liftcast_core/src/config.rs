//! Configuration file support for Liftcast.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftcast/config.toml`.
//! Every field has a default, so a partial file only overrides what it names.

use crate::trend::WeekOrder;
use crate::{Error, Result, SubmittedWeek};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub forecast: ForecastPolicy,
}

/// Data location configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// How distinct week ids are placed on the week axis
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekOrderPolicy {
    /// Plain string order of the ids
    #[default]
    Lexicographic,
    /// Shorter ids first, then string order
    Shortlex,
    /// Order in which weeks were submitted
    Submitted,
}

impl WeekOrderPolicy {
    /// Turn the policy into a concrete ordering for one snapshot
    pub fn resolve(&self, submitted: &[SubmittedWeek]) -> WeekOrder {
        match self {
            Self::Lexicographic => WeekOrder::Lexicographic,
            Self::Shortlex => WeekOrder::Shortlex,
            Self::Submitted => WeekOrder::from_submitted(submitted),
        }
    }
}

impl std::str::FromStr for WeekOrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" => Ok(Self::Lexicographic),
            "shortlex" => Ok(Self::Shortlex),
            "submitted" => Ok(Self::Submitted),
            other => Err(format!("Unknown week order: {}", other)),
        }
    }
}

/// Forecast thresholds and defaults
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ForecastPolicy {
    /// Lift to forecast when none is given
    #[serde(default = "default_exercise")]
    pub exercise: String,

    /// Logged sets needed before anything is estimated
    #[serde(default = "default_min_qualifying_sets")]
    pub min_qualifying_sets: usize,

    /// Distinct weeks needed to fit a trend
    #[serde(default = "default_min_weeks")]
    pub min_weeks: usize,

    /// Slope (lbs/week) at or below which a trend is not extrapolated.
    /// Also the assumed rate for the conservative floor estimate.
    #[serde(default = "default_unreliable_slope")]
    pub unreliable_slope: f64,

    /// Highest rep count used for 1RM estimation
    #[serde(default = "default_max_reps")]
    pub max_reps: u32,

    #[serde(default)]
    pub week_order: WeekOrderPolicy,
}

impl Default for ForecastPolicy {
    fn default() -> Self {
        Self {
            exercise: default_exercise(),
            min_qualifying_sets: default_min_qualifying_sets(),
            min_weeks: default_min_weeks(),
            unreliable_slope: default_unreliable_slope(),
            max_reps: default_max_reps(),
            week_order: WeekOrderPolicy::default(),
        }
    }
}

impl ForecastPolicy {
    /// Check that the thresholds keep the pipeline well defined
    pub fn validate(&self) -> Result<()> {
        if self.min_weeks < 2 {
            return Err(Error::Config(format!(
                "min_weeks must be at least 2, got {}",
                self.min_weeks
            )));
        }
        if !self.unreliable_slope.is_finite() || self.unreliable_slope <= 0.0 {
            return Err(Error::Config(format!(
                "unreliable_slope must be a positive number, got {}",
                self.unreliable_slope
            )));
        }
        if self.max_reps == 0 {
            return Err(Error::Config("max_reps must be at least 1".into()));
        }
        Ok(())
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("liftcast")
}

fn default_exercise() -> String {
    "Bench Press".into()
}

fn default_min_qualifying_sets() -> usize {
    5
}

fn default_min_weeks() -> usize {
    2
}

fn default_unreliable_slope() -> f64 {
    0.5
}

fn default_max_reps() -> u32 {
    crate::estimate::EPLEY_MAX_REPS
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.forecast.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("liftcast").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.forecast.exercise, "Bench Press");
        assert_eq!(config.forecast.min_qualifying_sets, 5);
        assert_eq!(config.forecast.min_weeks, 2);
        assert_eq!(config.forecast.unreliable_slope, 0.5);
        assert_eq!(config.forecast.max_reps, 12);
        assert_eq!(config.forecast.week_order, WeekOrderPolicy::Lexicographic);
        assert!(config.forecast.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.forecast.week_order = WeekOrderPolicy::Shortlex;
        config.forecast.unreliable_slope = 1.0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.forecast, config.forecast);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[forecast]
exercise = "Back Squat"
week_order = "submitted"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.forecast.exercise, "Back Squat");
        assert_eq!(config.forecast.week_order, WeekOrderPolicy::Submitted);
        assert_eq!(config.forecast.min_qualifying_sets, 5); // default
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[forecast]\nunreliable_slope = 0.0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let policy = ForecastPolicy {
            min_weeks: 1,
            ..ForecastPolicy::default()
        };
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_week_order_from_str() {
        assert_eq!(
            "Shortlex".parse::<WeekOrderPolicy>().unwrap(),
            WeekOrderPolicy::Shortlex
        );
        assert!("calendar".parse::<WeekOrderPolicy>().is_err());
    }
}
