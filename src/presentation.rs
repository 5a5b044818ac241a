//! Presentation adapter: room state → OLED text, LED strip, status LED.
//!
//! [`compose`] is pure and builds the four display lines; [`Presenter`]
//! pushes them, plus the level indicator, through the output ports.

use core::fmt::Write;

use heapless::String;

use crate::alarm::{AlarmPolicy, LedLevel};
use crate::app::ports::{DisplayPort, LedStripPort, StatusLedPort};
use crate::rooms::Room;

/// Usable characters per display line.
pub const DISPLAY_COLS: usize = 16;

pub type Line = String<DISPLAY_COLS>;

/// Top-left corners of the four text lines (128×64 panel, 6×10 font).
pub const LINE_ORIGINS: [(i32, i32); 4] = [(4, 4), (4, 18), (4, 32), (4, 46)];

/// Status LED brightness as a right shift of the level colour.
const STATUS_LED_DIM_SHIFT: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub lines: [Line; 4],
}

/// Copy `s` into a line, stopping before the first character that would
/// overflow it.
fn fit(s: &str) -> Line {
    let mut line = Line::new();
    for c in s.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
    line
}

/// Build the four display lines for `room`.
pub fn compose(room: &Room, full_recording: bool) -> Frame {
    // Scratch is wide enough for any f32 rendered with `{:.0}`.
    let mut scratch: String<64> = String::new();

    // Halves round away from zero; `{:.0}` alone rounds them to even.
    let _ = write!(scratch, "Temp:{:.0}°", room.temperature.round());
    let temp = fit(&scratch);

    scratch.clear();
    let _ = write!(scratch, "Hum:{:.0}%", room.humidity.round());
    let hum = fit(&scratch);

    let cam = if full_recording {
        "Cam:Full"
    } else if room.cam_on {
        "Cam:On"
    } else {
        "Cam:Off"
    };

    Frame {
        lines: [fit(&room.name), temp, hum, fit(cam)],
    }
}

pub struct Presenter;

impl Presenter {
    pub fn new() -> Self {
        Self
    }

    /// Draw `room` to every output surface.  Screen and strip are flushed
    /// once each.
    pub fn render(
        &self,
        room: &Room,
        full_recording: bool,
        level: LedLevel,
        policy: &AlarmPolicy,
        hw: &mut (impl DisplayPort + LedStripPort + StatusLedPort),
    ) -> Frame {
        let frame = compose(room, full_recording);

        hw.clear_screen();
        for (line, &(x, y)) in frame.lines.iter().zip(LINE_ORIGINS.iter()) {
            hw.draw_text(line, x, y);
        }
        hw.flush_screen();

        policy.draw_level(level, hw);
        hw.flush_strip();

        let (r, g, b) = level.colour();
        hw.set_led(
            r >> STATUS_LED_DIM_SHIFT,
            g >> STATUS_LED_DIM_SHIFT,
            b >> STATUS_LED_DIM_SHIFT,
        );

        frame
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
