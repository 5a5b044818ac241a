//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | room={}:{} | raw x={} y={} | T={:.1}\u{00b0} H={:.1}% | \
                     cam={} full={} | level={:?}",
                    t.room,
                    t.name,
                    t.raw_x,
                    t.raw_y,
                    t.temperature,
                    t.humidity,
                    if t.cam_on { "ON" } else { "off" },
                    t.full_recording,
                    t.level,
                );
            }
            AppEvent::RoomSelected { from, to } => {
                info!("ROOM  | {} -> {}", from, to);
            }
            AppEvent::FullRecordingChanged(on) => {
                info!("CAM   | full recording {}", if *on { "ON" } else { "off" });
            }
            AppEvent::AlertStarted(ch) => {
                info!("ALERT | {} started", ch);
            }
            AppEvent::AlertCleared(ch) => {
                info!("ALERT | {} auto-off", ch);
            }
            AppEvent::Started { room_count } => {
                info!("START | rooms={}", room_count);
            }
        }
    }
}
