//! Analog joystick standing in for a temperature/humidity sensor.
//!
//! X axis → humidity, Y axis → temperature.  Both are linear over the
//! 12-bit ADC range: a full-scale deflection reads 100 % humidity and
//! `max_temperature` degrees.

/// Linear raw → engineering-unit conversion.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    adc_max: f32,
    max_temperature: f32,
}

impl Scale {
    pub fn new(adc_max: u16, max_temperature: f32) -> Self {
        Self {
            adc_max: f32::from(adc_max.max(1)),
            max_temperature,
        }
    }

    /// `100 * raw / adc_max`
    pub fn humidity(&self, raw: u16) -> f32 {
        100.0 * f32::from(raw) / self.adc_max
    }

    /// `max_temperature * raw / adc_max`
    pub fn temperature(&self, raw: u16) -> f32 {
        self.max_temperature * f32::from(raw) / self.adc_max
    }
}
