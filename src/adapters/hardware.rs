//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the display, LED strip, buzzers, status LED and auto-off timers,
//! and exposes them through the hardware ports.  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_hal::delay::DelayNs;
use smart_leds::{SmartLedsWrite, RGB8};

use crate::adapters::led_strip::PixelStrip;
use crate::adapters::oled::{FrameFlush, OledDisplay};
use crate::alarm::{AlertChannel, STRIP_LEN};
use crate::app::ports::{
    AdcChannel, AnalogPort, DisplayPort, LedStripPort, StatusLedPort, TimerPort, TonePort,
};
use crate::drivers::buzzer::BuzzerDriver;
use crate::drivers::hw_init;
use crate::drivers::hw_timer::AutoOffTimer;
use crate::drivers::status_led::StatusLed;
use crate::pins;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<D, W, Dl> {
    display: OledDisplay<D>,
    strip: PixelStrip<W, STRIP_LEN>,
    buzzers: BuzzerDriver,
    led: StatusLed,
    timer: AutoOffTimer,
    delay: Dl,
    adc_settle_us: u32,
    last_channel: Option<AdcChannel>,
}

impl<D, W, Dl> HardwareAdapter<D, W, Dl>
where
    D: DrawTarget<Color = BinaryColor> + FrameFlush,
    W: SmartLedsWrite<Color = RGB8>,
    Dl: DelayNs,
{
    pub fn new(
        display: OledDisplay<D>,
        strip: PixelStrip<W, STRIP_LEN>,
        timer: AutoOffTimer,
        delay: Dl,
        adc_settle_us: u32,
    ) -> Self {
        Self {
            display,
            strip,
            buzzers: BuzzerDriver::new(),
            led: StatusLed::new(),
            timer,
            delay,
            adc_settle_us,
            last_channel: None,
        }
    }

    /// Silence everything and blank the LEDs.
    pub fn all_off(&mut self) {
        self.timer.cancel_all();
        self.buzzers.silence_all();
        self.strip.clear_strip();
        self.strip.flush_strip();
        self.led.off();
    }

    pub fn buzzers(&self) -> &BuzzerDriver {
        &self.buzzers
    }

    pub fn timer_mut(&mut self) -> &mut AutoOffTimer {
        &mut self.timer
    }

    pub fn status_led(&self) -> &StatusLed {
        &self.led
    }
}

// ── AnalogPort ────────────────────────────────────────────────

impl<D, W, Dl: DelayNs> AnalogPort for HardwareAdapter<D, W, Dl> {
    fn read_channel(&mut self, channel: AdcChannel) -> u16 {
        // The ADC sample-and-hold needs a moment after the mux moves.
        if self.last_channel != Some(channel) {
            self.delay.delay_us(self.adc_settle_us);
            self.last_channel = Some(channel);
        }
        let ch = match channel {
            AdcChannel::Humidity => pins::ADC1_CH_JOYSTICK_X,
            AdcChannel::Temperature => pins::ADC1_CH_JOYSTICK_Y,
        };
        hw_init::adc1_read(ch)
    }
}

// ── Output ports ──────────────────────────────────────────────

impl<D, W, Dl> DisplayPort for HardwareAdapter<D, W, Dl>
where
    D: DrawTarget<Color = BinaryColor> + FrameFlush,
{
    fn clear_screen(&mut self) {
        self.display.clear_screen();
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.display.draw_text(text, x, y);
    }

    fn flush_screen(&mut self) {
        self.display.flush_screen();
    }
}

impl<D, W, Dl> LedStripPort for HardwareAdapter<D, W, Dl>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn clear_strip(&mut self) {
        self.strip.clear_strip();
    }

    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.strip.set_pixel(index, r, g, b);
    }

    fn flush_strip(&mut self) {
        self.strip.flush_strip();
    }

    fn strip_len(&self) -> usize {
        self.strip.strip_len()
    }
}

impl<D, W, Dl> TonePort for HardwareAdapter<D, W, Dl> {
    fn play(&mut self, channel: AlertChannel, frequency_hz: u32) {
        self.buzzers.play(channel, frequency_hz);
    }

    fn silence(&mut self, channel: AlertChannel) {
        self.buzzers.silence(channel);
    }
}

impl<D, W, Dl> TimerPort for HardwareAdapter<D, W, Dl> {
    fn schedule_once(&mut self, delay_ms: u32, channel: AlertChannel) {
        self.timer.schedule_once(delay_ms, channel);
    }
}

impl<D, W, Dl> StatusLedPort for HardwareAdapter<D, W, Dl> {
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.led.set_colour(r, g, b);
    }
}
