//! Mock hardware adapter for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real ADC/LEDC/I²C/RMT peripherals.  The
//! joystick is a pair of settable raw values and the auto-off timers are
//! a deadline table advanced by [`MockHardware::advance_to`].

use roomwatch::alarm::AlertChannel;
use roomwatch::app::events::AppEvent;
use roomwatch::app::ports::{
    AdcChannel, AnalogPort, DisplayPort, EventSink, LedStripPort, StatusLedPort, TimerPort,
    TonePort,
};
use roomwatch::shared::SharedState;

pub const MOCK_STRIP_LEN: usize = 25;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    ClearScreen,
    DrawText { text: String, x: i32, y: i32 },
    FlushScreen,
    ClearStrip,
    FlushStrip,
    Play { ch: AlertChannel, hz: u32 },
    Silence(AlertChannel),
    Schedule { delay_ms: u32, ch: AlertChannel },
    SetLed { r: u8, g: u8, b: u8 },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub raw_x: u16,
    pub raw_y: u16,
    pub pixels: [(u8, u8, u8); MOCK_STRIP_LEN],
    pub now_ms: u32,
    /// Fire this auto-off from inside the next sensor read, i.e. after the
    /// cycle has drained its events but before the alarm is evaluated.
    pub expire_during_sample: Option<(&'static SharedState, AlertChannel)>,
    deadlines: [Option<u32>; AlertChannel::COUNT],
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            raw_x: 0,
            raw_y: 0,
            pixels: [(0, 0, 0); MOCK_STRIP_LEN],
            now_ms: 0,
            expire_during_sample: None,
            deadlines: [None; AlertChannel::COUNT],
        }
    }

    /// Joystick position giving (roughly) `temperature` with the default
    /// 60-degree full scale.
    pub fn set_temperature(&mut self, temperature: f32) {
        self.raw_y = (temperature / 60.0 * 4096.0).round() as u16;
    }

    /// Move the clock forward and fire any due auto-off timers.  Each
    /// expiry silences through the recorded call log, like the device
    /// timer callback does.
    pub fn advance_to(&mut self, now_ms: u32, shared: &SharedState) {
        self.now_ms = now_ms;
        for ch in AlertChannel::ALL {
            if let Some(deadline) = self.deadlines[ch.index()] {
                if now_ms >= deadline {
                    self.expire(ch, shared);
                }
            }
        }
    }

    fn expire(&mut self, ch: AlertChannel, shared: &SharedState) {
        self.deadlines[ch.index()] = None;
        let calls = &mut self.calls;
        shared.on_auto_off(ch, |c| calls.push(HwCall::Silence(c)));
    }

    pub fn pending(&self, ch: AlertChannel) -> Option<u32> {
        self.deadlines[ch.index()]
    }

    pub fn count(&self, pred: impl Fn(&HwCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Text lines of the most recent frame, in draw order.
    pub fn last_frame(&self) -> Vec<String> {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == HwCall::ClearScreen)
            .unwrap_or(0);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                HwCall::DrawText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn lit_pixels(&self) -> Vec<usize> {
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, px)| **px != (0, 0, 0))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogPort for MockHardware {
    fn read_channel(&mut self, channel: AdcChannel) -> u16 {
        if let Some((shared, ch)) = self.expire_during_sample.take() {
            self.expire(ch, shared);
        }
        match channel {
            AdcChannel::Humidity => self.raw_x,
            AdcChannel::Temperature => self.raw_y,
        }
    }
}

impl DisplayPort for MockHardware {
    fn clear_screen(&mut self) {
        self.calls.push(HwCall::ClearScreen);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        self.calls.push(HwCall::DrawText { text: text.to_string(), x, y });
    }

    fn flush_screen(&mut self) {
        self.calls.push(HwCall::FlushScreen);
    }
}

impl LedStripPort for MockHardware {
    fn clear_strip(&mut self) {
        self.pixels = [(0, 0, 0); MOCK_STRIP_LEN];
        self.calls.push(HwCall::ClearStrip);
    }

    fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        if let Some(px) = self.pixels.get_mut(index) {
            *px = (r, g, b);
        }
    }

    fn flush_strip(&mut self) {
        self.calls.push(HwCall::FlushStrip);
    }

    fn strip_len(&self) -> usize {
        MOCK_STRIP_LEN
    }
}

impl TonePort for MockHardware {
    fn play(&mut self, ch: AlertChannel, frequency_hz: u32) {
        self.calls.push(HwCall::Play { ch, hz: frequency_hz });
    }

    fn silence(&mut self, ch: AlertChannel) {
        self.calls.push(HwCall::Silence(ch));
    }
}

impl TimerPort for MockHardware {
    fn schedule_once(&mut self, delay_ms: u32, ch: AlertChannel) {
        self.calls.push(HwCall::Schedule { delay_ms, ch });
        self.deadlines[ch.index()] = Some(self.now_ms + delay_ms);
    }
}

impl StatusLedPort for MockHardware {
    fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(HwCall::SetLed { r, g, b });
    }
}

// ── Recording event sink ──────────────────────────────────────

pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
