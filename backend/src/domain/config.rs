//! Tunable behaviour of the range picker.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::DateFormat;
use std::path::Path;

use super::locale::DEFAULT_LOCALE;

/// Configuration for smart defaults, presets, formatting and validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DateRangeConfig {
    /// Grid the default end time snaps to
    pub time_interval_minutes: u32,
    /// Minimum distance between now and the default end time
    pub min_minutes_from_now: u32,
    /// How far the end time is pushed past the start time when the start date overtakes the end date
    pub end_time_increment_minutes: u32,
    /// Per-side slack, in days, when matching a range against the presets
    pub preset_tolerance_days: u32,
    pub default_locale: String,
    pub default_date_format: DateFormat,
    /// Shown when neither date is set
    pub placeholder: String,
    /// Longest range (in days, inclusive of both ends) before a general error is reported
    pub max_range_days: Option<u32>,
}

impl Default for DateRangeConfig {
    fn default() -> Self {
        Self {
            time_interval_minutes: 30,
            min_minutes_from_now: 30,
            end_time_increment_minutes: 30,
            preset_tolerance_days: 1,
            default_locale: DEFAULT_LOCALE.to_string(),
            default_date_format: DateFormat::Medium,
            placeholder: "Select date range".to_string(),
            max_range_days: None,
        }
    }
}

impl DateRangeConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: DateRangeConfig = serde_yaml::from_str(yaml).context("Failed to parse date range config")?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&contents)?;
        log::info!("⚙️ CONFIG: Loaded date range config from {}", path.display());
        Ok(config)
    }
}
