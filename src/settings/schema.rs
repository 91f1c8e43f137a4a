//! Settings schema
//!
//! `SplitterSettings` is the persisted shape: the enabled flag plus the
//! interval decomposed into hours/minutes/seconds for editing.
//! `SplitterConfig` is the canonical runtime value handed to the
//! scheduler; `interval_seconds` is authoritative and the decomposed
//! fields exist for editing only.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Upper bound of the seconds field
pub const MAX_FIELD_SECONDS: u64 = 59;
/// Upper bound of the minutes field
pub const MAX_FIELD_MINUTES: u64 = 59;
/// Upper bound of the hours field
pub const MAX_FIELD_HOURS: u64 = 240;

/// Settings validation errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{field} out of range: {value} (max {max})")]
    FieldOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// The interval decomposed into bounded editing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalFields {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl IntervalFields {
    /// Build fields, rejecting out-of-range values
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Result<Self, SettingsError> {
        if seconds > MAX_FIELD_SECONDS {
            return Err(SettingsError::FieldOutOfRange {
                field: "seconds",
                value: seconds,
                max: MAX_FIELD_SECONDS,
            });
        }
        if minutes > MAX_FIELD_MINUTES {
            return Err(SettingsError::FieldOutOfRange {
                field: "minutes",
                value: minutes,
                max: MAX_FIELD_MINUTES,
            });
        }
        if hours > MAX_FIELD_HOURS {
            return Err(SettingsError::FieldOutOfRange {
                field: "hours",
                value: hours,
                max: MAX_FIELD_HOURS,
            });
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Recompose the canonical total
    pub fn total_seconds(&self) -> u64 {
        self.seconds + (self.minutes + self.hours * 60) * 60
    }

    /// Decompose a total back into canonical fields
    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total / 60) % 60,
            seconds: total % 60,
        }
    }

    /// Coerce a zero total to one second
    ///
    /// Returns true when anything changed, i.e. the UI must refresh.
    pub fn normalize(&mut self) -> bool {
        if self.total_seconds() == 0 {
            self.seconds = 1;
            true
        } else {
            false
        }
    }
}

/// Canonical runtime configuration for the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitterConfig {
    /// Whether automatic restarts are enabled
    pub enabled: bool,

    /// Restart interval, always >= 1s
    pub interval: Duration,
}

impl SplitterConfig {
    /// Build a config, coercing a zero interval to one second
    pub fn new(enabled: bool, interval_seconds: u64) -> Self {
        Self {
            enabled,
            interval: Duration::from_secs(interval_seconds.max(1)),
        }
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self::new(false, 60)
    }
}

/// Persisted settings, one field per stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitterSettings {
    /// Whether automatic restarts are enabled
    #[serde(default)]
    pub enabled: bool,

    /// Seconds field (0-59)
    #[serde(default)]
    pub interval_s: u64,

    /// Minutes field (0-59)
    #[serde(default)]
    pub interval_m: u64,

    /// Hours field (0-240)
    #[serde(default)]
    pub interval_h: u64,
}

impl Default for SplitterSettings {
    fn default() -> Self {
        // Disabled, one minute between restarts
        Self {
            enabled: false,
            interval_s: 0,
            interval_m: 1,
            interval_h: 0,
        }
    }
}

impl SplitterSettings {
    /// The decomposed interval, validated against the field bounds
    pub fn fields(&self) -> Result<IntervalFields, SettingsError> {
        IntervalFields::new(self.interval_h, self.interval_m, self.interval_s)
    }

    /// Store a decomposed interval
    pub fn set_fields(&mut self, fields: IntervalFields) {
        self.interval_h = fields.hours;
        self.interval_m = fields.minutes;
        self.interval_s = fields.seconds;
    }

    /// The runtime configuration these settings describe
    pub fn config(&self) -> Result<SplitterConfig, SettingsError> {
        let fields = self.fields()?;
        Ok(SplitterConfig::new(self.enabled, fields.total_seconds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_round_trips_for_in_bounds_fields() {
        let cases = [(0, 0, 1), (0, 1, 0), (1, 0, 0), (4, 30, 15), (240, 59, 59)];
        for (hours, minutes, seconds) in cases {
            let fields = IntervalFields::new(hours, minutes, seconds).unwrap();
            let total = fields.total_seconds();
            assert!(total > 0);
            assert_eq!(IntervalFields::from_total_seconds(total), fields);
        }
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        assert!(IntervalFields::new(0, 0, 60).is_err());
        assert!(IntervalFields::new(0, 60, 0).is_err());
        assert!(IntervalFields::new(241, 0, 0).is_err());
    }

    #[test]
    fn zero_total_normalizes_to_one_second() {
        let mut fields = IntervalFields::new(0, 0, 0).unwrap();
        assert!(fields.normalize());
        assert_eq!(fields.seconds, 1);
        assert_eq!(fields.total_seconds(), 1);

        // Already non-zero: no change needed
        assert!(!fields.normalize());
    }

    #[test]
    fn config_coerces_zero_interval() {
        let settings = SplitterSettings {
            enabled: true,
            interval_s: 0,
            interval_m: 0,
            interval_h: 0,
        };
        let config = settings.config().unwrap();
        assert_eq!(config.interval, Duration::from_secs(1));
        assert!(config.enabled);
    }

    #[test]
    fn default_settings_give_one_minute_disabled() {
        let config = SplitterSettings::default().config().unwrap();
        assert!(!config.enabled);
        assert_eq!(config.interval, Duration::from_secs(60));
    }

    #[test]
    fn config_rejects_out_of_range_settings() {
        let settings = SplitterSettings {
            enabled: true,
            interval_s: 0,
            interval_m: 99,
            interval_h: 0,
        };
        assert!(settings.config().is_err());
    }
}
