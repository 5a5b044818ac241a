//! Sensor subsystem — the joystick sampler.
//!
//! [`Sampler::sample`] reads the two ADC channels through
//! [`AnalogPort`]; [`Sampler::scale`] turns the raw pair into a
//! [`Reading`] that is written into the selected room.

pub mod joystick;

use crate::app::ports::{AdcChannel, AnalogPort};
use crate::config::MonitorConfig;
use joystick::Scale;

/// Raw ADC pair, each in `[0, adc_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    /// Joystick X (humidity channel).
    pub x: u16,
    /// Joystick Y (temperature channel).
    pub y: u16,
}

/// Scaled reading in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    pub humidity_pct: f32,
    pub temperature: f32,
}

pub struct Sampler {
    adc_max: u16,
    scale: Scale,
}

impl Sampler {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            adc_max: config.adc_max,
            scale: Scale::new(config.adc_max, config.max_temperature),
        }
    }

    /// Read humidity (X) then temperature (Y).  Out-of-range conversions
    /// are clamped to `adc_max - 1`.
    pub fn sample(&self, adc: &mut impl AnalogPort) -> RawSample {
        let x = adc.read_channel(AdcChannel::Humidity);
        let y = adc.read_channel(AdcChannel::Temperature);
        RawSample {
            x: self.clamp(x),
            y: self.clamp(y),
        }
    }

    pub fn scale(&self, raw: RawSample) -> Reading {
        Reading {
            humidity_pct: self.scale.humidity(raw.x),
            temperature: self.scale.temperature(raw.y),
        }
    }

    fn clamp(&self, raw: u16) -> u16 {
        raw.min(self.adc_max.saturating_sub(1))
    }
}
