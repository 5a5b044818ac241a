//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (ADC, display, LED strip, buzzers, timers, event sinks)
//! implement these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Every method is infallible from the core's point of view.  Hardware
//! writes are best-effort; adapters log failures and carry on.

use crate::alarm::AlertChannel;

// ───────────────────────────────────────────────────────────────
// Analog input (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// The two joystick axes standing in for room sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcChannel {
    /// Joystick X.
    Humidity,
    /// Joystick Y.
    Temperature,
}

pub trait AnalogPort {
    /// One raw conversion.  Values at or above the configured ADC range
    /// are clamped by the sampler.
    fn read_channel(&mut self, channel: AdcChannel) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Display (driven adapter: domain → OLED)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Blank the off-screen frame.
    fn clear_screen(&mut self);

    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: i32, y: i32);

    /// Push the frame to the panel.
    fn flush_screen(&mut self);
}

// ───────────────────────────────────────────────────────────────
// LED strip (driven adapter: domain → addressable LEDs)
// ───────────────────────────────────────────────────────────────

pub trait LedStripPort {
    /// Turn every pixel off (buffered).
    fn clear_strip(&mut self);

    /// Set one pixel (buffered).  Out-of-range indices are ignored.
    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8);

    /// Latch the buffered pixels onto the strip.
    fn flush_strip(&mut self);

    fn strip_len(&self) -> usize;
}

// ───────────────────────────────────────────────────────────────
// Buzzers and auto-off timers
// ───────────────────────────────────────────────────────────────

pub trait TonePort {
    /// Start a continuous tone on the channel's buzzer.
    fn play(&mut self, channel: AlertChannel, frequency_hz: u32);

    /// Stop the channel's buzzer.
    fn silence(&mut self, channel: AlertChannel);
}

/// One-shot timers for alert auto-off.
///
/// Implementations MUST call
/// [`SharedState::on_auto_off`](crate::shared::SharedState::on_auto_off)
/// with `channel` and a path that silences its buzzer once `delay_ms` has
/// elapsed.  The core never schedules a
/// second timer for a channel whose first one is still pending.
pub trait TimerPort {
    fn schedule_once(&mut self, delay_ms: u32, channel: AlertChannel);
}

// ───────────────────────────────────────────────────────────────
// Status LED
// ───────────────────────────────────────────────────────────────

pub trait StatusLedPort {
    /// Set the RGB status LED colour.
    fn set_led(&mut self, r: u8, g: u8, b: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
