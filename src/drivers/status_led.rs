//! Discrete RGB status LED.
//!
//! Shows the temperature level at a glance next to the matrix.  Each
//! colour component is an 8-bit LEDC duty on its own channel (CH2-4).
//! Writes are skipped while the colour is unchanged, so the per-cycle
//! refresh costs nothing in steady state.
//!
//! On host/test builds `hw_init::ledc_set` is a no-op and only the
//! tracked colour and write count change.

use smart_leds::RGB8;

use crate::drivers::hw_init;

/// LEDC channel for each component, in R, G, B order.
const CHANNELS: [u32; 3] = [
    hw_init::LEDC_CH_LED_R,
    hw_init::LEDC_CH_LED_G,
    hw_init::LEDC_CH_LED_B,
];

#[derive(Default)]
pub struct StatusLed {
    colour: RGB8,
    writes: u32,
}

impl StatusLed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_colour(&mut self, r: u8, g: u8, b: u8) {
        let colour = RGB8::new(r, g, b);
        if colour == self.colour {
            return;
        }
        for (channel, duty) in CHANNELS.into_iter().zip([r, g, b]) {
            hw_init::ledc_set(channel, duty);
        }
        self.colour = colour;
        self.writes = self.writes.wrapping_add(1);
    }

    pub fn off(&mut self) {
        self.set_colour(0, 0, 0);
    }

    pub fn current_colour(&self) -> (u8, u8, u8) {
        (self.colour.r, self.colour.g, self.colour.b)
    }

    /// Colour changes actually pushed to the LEDC.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}
