//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  On the device
//! they end up on the serial log.

use crate::alarm::{AlertChannel, LedLevel};
use crate::rooms::RoomName;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started.
    Started { room_count: usize },

    /// Per-cycle telemetry snapshot.
    Telemetry(TelemetryData),

    /// The selected room changed since the previous cycle.
    RoomSelected { from: usize, to: usize },

    /// The full-recording override was toggled.
    FullRecordingChanged(bool),

    /// An alert went Idle → Playing.
    AlertStarted(AlertChannel),

    /// An alert's auto-off fired and its buzzer was silenced.
    AlertCleared(AlertChannel),
}

/// A point-in-time snapshot of the selected room.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub room: usize,
    pub name: RoomName,
    pub raw_x: u16,
    pub raw_y: u16,
    pub temperature: f32,
    pub humidity: f32,
    pub cam_on: bool,
    pub full_recording: bool,
    pub level: LedLevel,
}
