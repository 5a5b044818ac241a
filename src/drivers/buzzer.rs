//! Alert buzzers: two passive piezo buzzers on LEDC PWM (ch0 / ch1).
//!
//! A tone is a 50 % square wave; the pitch is set by retuning the
//! buzzer's own LEDC timer.  Silence is duty 0 on the buzzer's channel.
//!
//! Whether a channel is sounding is tracked by
//! [`AlertFlags`](crate::alarm::AlertFlags), not here: the auto-off timer
//! silences through [`cut`] from the esp_timer task, outside the driver.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real PWM via hw_init helpers.
//! On host/test: the LEDC helpers are no-ops.

use crate::alarm::AlertChannel;
use crate::drivers::hw_init;
use crate::pins;

/// (LEDC timer, LEDC channel) for an alert channel.
pub const fn ledc_route(ch: AlertChannel) -> (u32, u32) {
    match ch {
        AlertChannel::Low => (hw_init::LEDC_TIMER_BUZZER_LOW, hw_init::LEDC_CH_BUZZER_LOW),
        AlertChannel::High => (hw_init::LEDC_TIMER_BUZZER_HIGH, hw_init::LEDC_CH_BUZZER_HIGH),
    }
}

/// Zero the channel's duty.  Touches only that channel's LEDC registers,
/// so it is safe from the timer task while the main cycle drives the
/// other buzzer.
pub fn cut(ch: AlertChannel) {
    let (_, channel) = ledc_route(ch);
    hw_init::ledc_set(channel, 0);
}

#[derive(Default)]
pub struct BuzzerDriver {
    last_tone_hz: [u32; AlertChannel::COUNT],
}

impl BuzzerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tone.  A zero frequency is treated as silence.
    pub fn play(&mut self, ch: AlertChannel, frequency_hz: u32) {
        if frequency_hz == 0 {
            self.silence(ch);
            return;
        }
        let (timer, channel) = ledc_route(ch);
        hw_init::ledc_set_freq(timer, frequency_hz);
        hw_init::ledc_set(channel, pins::BUZZER_TONE_DUTY);
        self.last_tone_hz[ch.index()] = frequency_hz;
    }

    pub fn silence(&mut self, ch: AlertChannel) {
        cut(ch);
    }

    pub fn silence_all(&mut self) {
        for ch in AlertChannel::ALL {
            cut(ch);
        }
    }

    /// Frequency of the most recent tone started on `ch` (0 if none).
    pub fn last_tone_hz(&self, ch: AlertChannel) -> u32 {
        self.last_tone_hz[ch.index()]
    }
}
