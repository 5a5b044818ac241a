//! Alarm policy.
//!
//! Runs once per cycle, **after** the sensor update, against the room that
//! is currently selected.  It owns three decisions:
//!
//! 1. The camera-recording flag (`cam_on`), recomputed unconditionally.
//! 2. The audible alerts, one state machine per [`AlertChannel`]:
//!
//!    ```text
//!    Idle ──(threshold crossed, CAS)──▶ Playing ──(auto-off timer)──▶ Idle
//!    ```
//!
//!    A Playing channel is never retriggered and never reschedules its
//!    timer.  The timer callback silences the buzzer and then clears the
//!    flag through
//!    [`SharedState::on_auto_off`](crate::shared::SharedState::on_auto_off).
//! 3. The LED level bucket shown on the strip and the status LED.

use core::sync::atomic::{AtomicBool, Ordering};

use log::info;

use crate::app::ports::{LedStripPort, TimerPort, TonePort};
use crate::config::MonitorConfig;
use crate::rooms::Room;

// ── Alert channels ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AlertChannel {
    Low = 0,
    High = 1,
}

impl AlertChannel {
    pub const COUNT: usize = 2;
    pub const ALL: [Self; Self::COUNT] = [Self::Low, Self::High];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Self::Low),
            1 => Some(Self::High),
            _ => None,
        }
    }
}

impl core::fmt::Display for AlertChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Per-channel playing flags.  Set by the main cycle, cleared by the
/// auto-off timer.
pub struct AlertFlags {
    playing: [AtomicBool; AlertChannel::COUNT],
}

impl AlertFlags {
    pub const fn new() -> Self {
        Self {
            playing: [AtomicBool::new(false), AtomicBool::new(false)],
        }
    }

    /// Idle → Playing.  Returns `false` if the channel was already playing.
    pub fn try_arm(&self, ch: AlertChannel) -> bool {
        self.playing[ch.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Playing → Idle.  Returns whether the channel was playing.
    pub fn release(&self, ch: AlertChannel) -> bool {
        self.playing[ch.index()].swap(false, Ordering::AcqRel)
    }

    pub fn is_playing(&self, ch: AlertChannel) -> bool {
        self.playing[ch.index()].load(Ordering::Acquire)
    }
}

impl Default for AlertFlags {
    fn default() -> Self {
        Self::new()
    }
}

// ── LED levels ────────────────────────────────────────────────

/// Pixels lit per level.
pub const LEDS_PER_LEVEL: usize = 5;
/// Strip length (5×5 matrix).
pub const STRIP_LEN: usize = LEDS_PER_LEVEL * LedLevel::COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LedLevel {
    VeryLow = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    VeryHigh = 4,
}

impl LedLevel {
    pub const COUNT: usize = 5;

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Full-brightness colour for this level.
    pub const fn colour(self) -> (u8, u8, u8) {
        match self {
            Self::VeryLow => (0, 0, 255),
            Self::Low => (0, 255, 255),
            Self::Medium => (0, 255, 0),
            Self::High => (255, 255, 0),
            Self::VeryHigh => (255, 0, 0),
        }
    }

    /// Half-open pixel range lit for this level.
    pub const fn run(self) -> core::ops::Range<usize> {
        let start = self.index() * LEDS_PER_LEVEL;
        start..start + LEDS_PER_LEVEL
    }
}

// ── Policy ────────────────────────────────────────────────────

/// What one evaluation decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmOutcome {
    pub cam_on: bool,
    pub level: LedLevel,
    /// Channel that went Idle → Playing this cycle, if any.
    pub started: Option<AlertChannel>,
}

pub struct AlarmPolicy {
    low: f32,
    cool: f32,
    camera: f32,
    high: f32,
    low_tone_hz: u32,
    high_tone_hz: u32,
    alert_duration_ms: u32,
}

impl AlarmPolicy {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            low: config.low_temp_threshold,
            cool: config.cool_threshold,
            camera: config.camera_threshold,
            high: config.high_temp_threshold,
            low_tone_hz: config.low_alert_tone_hz,
            high_tone_hz: config.high_alert_tone_hz,
            alert_duration_ms: config.alert_duration_ms,
        }
    }

    pub fn camera_on(&self, temperature: f32) -> bool {
        temperature > self.camera
    }

    pub fn level_for(&self, temperature: f32) -> LedLevel {
        if temperature < self.low {
            LedLevel::VeryLow
        } else if temperature < self.cool {
            LedLevel::Low
        } else if temperature <= self.camera {
            LedLevel::Medium
        } else if temperature <= self.high {
            LedLevel::High
        } else {
            LedLevel::VeryHigh
        }
    }

    /// Which alert, if any, the temperature calls for.
    pub fn alert_for(&self, temperature: f32) -> Option<AlertChannel> {
        if temperature < self.low {
            Some(AlertChannel::Low)
        } else if temperature > self.high {
            Some(AlertChannel::High)
        } else {
            None
        }
    }

    pub fn tone_hz(&self, ch: AlertChannel) -> u32 {
        match ch {
            AlertChannel::Low => self.low_tone_hz,
            AlertChannel::High => self.high_tone_hz,
        }
    }

    /// Evaluate `room` and drive the buzzer/timer for any newly armed alert.
    pub fn evaluate(
        &self,
        room: &mut Room,
        alerts: &AlertFlags,
        hw: &mut (impl TonePort + TimerPort),
    ) -> AlarmOutcome {
        let t = room.temperature;
        room.cam_on = self.camera_on(t);

        let started = self.alert_for(t).filter(|&ch| alerts.try_arm(ch));
        if let Some(ch) = started {
            info!("{} alert: {} at {:.1}", ch, room.name, t);
            hw.play(ch, self.tone_hz(ch));
            hw.schedule_once(self.alert_duration_ms, ch);
        }

        AlarmOutcome {
            cam_on: room.cam_on,
            level: self.level_for(t),
            started,
        }
    }

    /// Clear the strip and light the run for `level`.  Does not flush.
    pub fn draw_level(&self, level: LedLevel, strip: &mut impl LedStripPort) {
        strip.clear_strip();
        let (r, g, b) = level.colour();
        let len = strip.strip_len();
        for i in level.run().filter(|&i| i < len) {
            strip.set_pixel(i, r, g, b);
        }
    }
}
