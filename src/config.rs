//! System configuration parameters
//!
//! All tunable parameters for the RoomWatch monitor.
//! Defaults are compiled in; the device binary may override them with a
//! JSON document supplied at build time (see [`MonitorConfig::from_json`]).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rooms::{DEFAULT_ROOM_NAMES, ROOM_COUNT, RoomName, room_name};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    // --- Sensor scaling ---
    /// Exclusive upper bound of a raw ADC sample (12-bit ADC = 4096).
    pub adc_max: u16,
    /// Temperature reported for a full-scale joystick deflection.
    pub max_temperature: f32,
    /// Settle delay between ADC channel switches (microseconds).
    pub adc_settle_us: u32,

    // --- Thresholds ---
    /// Below this temperature the low alert sounds.
    pub low_temp_threshold: f32,
    /// Upper edge of the "low" LED level.
    pub cool_threshold: f32,
    /// Above this temperature the camera records.
    pub camera_threshold: f32,
    /// Above this temperature the high alert sounds.
    pub high_temp_threshold: f32,

    // --- Alerts ---
    /// Buzzer frequency for the low-temperature alert (Hz).
    pub low_alert_tone_hz: u32,
    /// Buzzer frequency for the high-temperature alert (Hz).
    pub high_alert_tone_hz: u32,
    /// How long an alert sounds before the auto-off timer silences it.
    pub alert_duration_ms: u32,

    // --- Input ---
    /// Quiet window after an accepted button event (milliseconds).
    pub debounce_window_ms: u32,

    // --- Timing ---
    /// Main cycle period (milliseconds).
    pub cycle_period_ms: u32,

    // --- Rooms ---
    pub room_names: [RoomName; ROOM_COUNT],
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            // Sensor scaling
            adc_max: 4096,
            max_temperature: 60.0,
            adc_settle_us: 2,

            // Thresholds
            low_temp_threshold: 7.0,
            cool_threshold: 20.0,
            camera_threshold: 37.0,
            high_temp_threshold: 44.0,

            // Alerts
            low_alert_tone_hz: 440,
            high_alert_tone_hz: 1_000,
            alert_duration_ms: 5_000,

            // Input
            debounce_window_ms: 250,

            // Timing
            cycle_period_ms: 500, // 2 Hz

            room_names: DEFAULT_ROOM_NAMES.map(room_name),
        }
    }
}

impl MonitorConfig {
    /// Range-check every field.  Inconsistent values are rejected rather
    /// than clamped so a bad override never reaches the alarm policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_max < 2 {
            return Err(ConfigError::ValidationFailed("adc_max must be at least 2"));
        }
        if !(self.max_temperature.is_finite() && self.max_temperature > 0.0) {
            return Err(ConfigError::ValidationFailed("max_temperature must be positive"));
        }
        let ordered = self.low_temp_threshold < self.cool_threshold
            && self.cool_threshold <= self.camera_threshold
            && self.camera_threshold < self.high_temp_threshold;
        if !ordered {
            return Err(ConfigError::ValidationFailed(
                "thresholds must satisfy low < cool <= camera < high",
            ));
        }
        if self.low_temp_threshold < 0.0 || self.high_temp_threshold > self.max_temperature {
            return Err(ConfigError::ValidationFailed(
                "thresholds must lie within 0..=max_temperature",
            ));
        }
        if self.low_alert_tone_hz == 0 || self.high_alert_tone_hz == 0 {
            return Err(ConfigError::ValidationFailed("alert tones must be non-zero"));
        }
        if self.alert_duration_ms == 0 {
            return Err(ConfigError::ValidationFailed("alert_duration_ms must be non-zero"));
        }
        if self.cycle_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("cycle_period_ms must be non-zero"));
        }
        if self.room_names.iter().any(|n| n.is_empty()) {
            return Err(ConfigError::ValidationFailed("room names must not be empty"));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Start-up configuration: the override document if one was supplied,
    /// compiled-in defaults otherwise.
    pub fn load(override_json: Option<&str>) -> Result<Self, ConfigError> {
        match override_json {
            Some(json) => Self::from_json(json),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }
}
