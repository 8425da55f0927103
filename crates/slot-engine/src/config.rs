//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::schedule::ScheduleConfig;

/// A day is `limited` when fewer than this share of its slots is available.
pub const DEFAULT_LIMITED_THRESHOLD: f64 = 0.3;

/// Range queries starting more than this many days before today are empty.
pub const DEFAULT_MAX_PAST_DAYS: i64 = 365;

/// Longest window a facade range query resolves; longer requests are clamped.
pub const DEFAULT_MAX_RANGE_DAYS: i64 = 366;

/// Available times offered per suggested day.
pub const DEFAULT_SUGGESTIONS_PER_DAY: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub limited_threshold: f64,
    pub max_past_days: i64,
    pub max_range_days: i64,
    pub suggestions_per_day: usize,
    /// Substituted for vendors that have no schedule configured.
    pub default_schedule: ScheduleConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limited_threshold: DEFAULT_LIMITED_THRESHOLD,
            max_past_days: DEFAULT_MAX_PAST_DAYS,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
            suggestions_per_day: DEFAULT_SUGGESTIONS_PER_DAY,
            default_schedule: ScheduleConfig::generic_default(),
        }
    }
}

impl EngineConfig {
    pub fn with_limited_threshold(mut self, limited_threshold: f64) -> Self {
        self.limited_threshold = limited_threshold;
        self
    }

    /// # Errors
    /// Returns `EngineError::InvalidConfig` when the threshold is outside
    /// `0.0..=1.0`, `max_past_days` is negative, `max_range_days` is not
    /// positive, or the default schedule is itself invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.limited_threshold) {
            return Err(EngineError::InvalidConfig(format!(
                "limitedThreshold {} must be within 0.0..=1.0",
                self.limited_threshold
            )));
        }
        if self.max_past_days < 0 {
            return Err(EngineError::InvalidConfig(format!(
                "maxPastDays {} must not be negative",
                self.max_past_days
            )));
        }
        if self.max_range_days < 1 {
            return Err(EngineError::InvalidConfig(format!(
                "maxRangeDays {} must be at least 1",
                self.max_range_days
            )));
        }
        self.default_schedule
            .validate()
            .map_err(|e| EngineError::InvalidConfig(format!("defaultSchedule: {}", e)))
    }
}
