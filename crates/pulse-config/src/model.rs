use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const HOME_ENV: &str = "BUDGET_PULSE_HOME";
const DEFAULT_DIR_NAME: &str = ".budget_pulse";
const DATA_DIR: &str = "data";
const DATA_FILE: &str = "budget.json";

/// Stores user-configurable budgeting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// Day of month the budget period restarts on (1–31).
    #[serde(default = "Config::default_payday")]
    pub payday: u32,
    /// Monthly spending budget in minor units; `0` means no budget configured.
    #[serde(default)]
    pub monthly_budget: i64,
    #[serde(default)]
    pub insights: InsightThresholds,
    #[serde(default)]
    pub scroll_spy: ScrollSpySettings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom location of the data snapshot. Defaults to `<home>/data/budget.json`.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            payday: Self::default_payday(),
            monthly_budget: 0,
            insights: InsightThresholds::default(),
            scroll_spy: ScrollSpySettings::default(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "ko-KR".into()
    }

    pub fn default_currency() -> String {
        "KRW".into()
    }

    pub fn default_payday() -> u32 {
        1
    }

    /// Checks cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=31).contains(&self.payday) {
            return Err(ConfigError::Invalid(format!(
                "payday must be between 1 and 31, got {}",
                self.payday
            )));
        }
        if self.monthly_budget < 0 {
            return Err(ConfigError::Invalid(
                "monthly budget cannot be negative".into(),
            ));
        }
        self.insights.validate()?;
        self.scroll_spy.validate()
    }

    /// Application home: `BUDGET_PULSE_HOME` when set, otherwise `~/.budget_pulse`.
    pub fn home_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_data_file(&self) -> PathBuf {
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        Self::home_dir().join(DATA_DIR).join(DATA_FILE)
    }
}

/// Percent-used cut-offs that split budgeted categories into insight buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InsightThresholds {
    /// Categories at or above this share of their budget need attention.
    #[serde(default = "InsightThresholds::default_caution")]
    pub caution_percent: f64,
    /// Categories below this share still have comfortable room.
    #[serde(default = "InsightThresholds::default_room")]
    pub room_percent: f64,
}

impl InsightThresholds {
    pub fn default_caution() -> f64 {
        80.0
    }

    pub fn default_room() -> f64 {
        50.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.caution_percent.is_finite() && self.room_percent.is_finite();
        if !finite || self.room_percent < 0.0 || self.room_percent > self.caution_percent {
            return Err(ConfigError::Invalid(format!(
                "insight thresholds must satisfy 0 <= room ({}) <= caution ({})",
                self.room_percent, self.caution_percent
            )));
        }
        Ok(())
    }
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            caution_percent: Self::default_caution(),
            room_percent: Self::default_room(),
        }
    }
}

/// Tuning for the sticky month/date header tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScrollSpySettings {
    /// Viewport offset (px) a section must reach to become active.
    #[serde(default = "ScrollSpySettings::default_threshold")]
    pub threshold_px: f64,
    /// How long a section transition stays flagged before clearing.
    #[serde(default = "ScrollSpySettings::default_settle_ms")]
    pub settle_ms: u64,
}

impl ScrollSpySettings {
    pub fn default_threshold() -> f64 {
        120.0
    }

    pub fn default_settle_ms() -> u64 {
        300
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_px.is_finite() {
            return Err(ConfigError::Invalid("scroll threshold must be finite".into()));
        }
        Ok(())
    }
}

impl Default for ScrollSpySettings {
    fn default() -> Self {
        Self {
            threshold_px: Self::default_threshold(),
            settle_ms: Self::default_settle_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        Config::default().validate().expect("defaults are valid");
    }

    #[test]
    fn payday_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.payday = 0;
        assert!(config.validate().is_err());
        config.payday = 32;
        assert!(config.validate().is_err());
        config.payday = 31;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let mut config = Config::default();
        config.insights.room_percent = 90.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str(r#"{"payday": 25}"#).expect("parse");
        assert_eq!(config.payday, 25);
        assert_eq!(config.currency, "KRW");
        assert_eq!(config.insights, InsightThresholds::default());
    }
}
