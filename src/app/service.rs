//! Application service — the hexagonal core.
//!
//! [`MonitorService`] owns the room registry, the sampler, the alarm
//! policy and the presenter.  All I/O flows through port traits injected
//! at call sites, and all state shared with interrupt context comes in
//! through a [`SharedState`] reference, making the entire service testable
//! with mock adapters and a local `SharedState`.
//!
//! ```text
//!   AnalogPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                  │        MonitorService        │
//!  SharedState ──▶ │ Rooms · Sampler · Alarm ·    │ ──▶ Display / Strip / LED
//!                  │ Presenter                    │ ──▶ Tone / Timer
//!                  └─────────────────────────────┘
//! ```

use log::{debug, info};

use crate::alarm::{AlarmOutcome, AlarmPolicy};
use crate::config::MonitorConfig;
use crate::events::Event;
use crate::presentation::{Frame, Presenter};
use crate::rooms::RoomRegistry;
use crate::sensors::{RawSample, Sampler};
use crate::shared::SharedState;

use super::events::{AppEvent, TelemetryData};
use super::ports::{
    AnalogPort, DisplayPort, EventSink, LedStripPort, StatusLedPort, TimerPort, TonePort,
};

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

pub struct MonitorService {
    config: MonitorConfig,
    rooms: RoomRegistry,
    sampler: Sampler,
    policy: AlarmPolicy,
    presenter: Presenter,
    cycle_count: u64,
    last_full_recording: bool,
    last_raw: RawSample,
    last_outcome: Option<AlarmOutcome>,
    last_frame: Option<Frame>,
}

impl MonitorService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch shared state; call [`start`](Self::start) next.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            rooms: RoomRegistry::new(&config.room_names),
            sampler: Sampler::new(&config),
            policy: AlarmPolicy::new(&config),
            presenter: Presenter::new(),
            config,
            cycle_count: 0,
            last_full_recording: false,
            last_raw: RawSample::default(),
            last_outcome: None,
            last_frame: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Apply configuration to the shared state and announce start-up.
    pub fn start(&mut self, shared: &SharedState, sink: &mut impl EventSink) {
        shared.debouncer.set_window_ms(self.config.debounce_window_ms);
        self.last_full_recording = shared.full_recording();
        sink.emit(&AppEvent::Started {
            room_count: self.rooms.len(),
        });
        info!(
            "MonitorService started: {} rooms, {} ms cycle",
            self.rooms.len(),
            self.config.cycle_period_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle:
    /// expiry reports → navigation → sample → scale → alarm → render → telemetry.
    ///
    /// The `hw` parameter satisfies every hardware port at once; this
    /// avoids overlapping mutable borrows while keeping each port boundary
    /// explicit.
    pub fn cycle<H>(&mut self, shared: &SharedState, hw: &mut H, sink: &mut impl EventSink)
    where
        H: AnalogPort + TonePort + TimerPort + DisplayPort + LedStripPort + StatusLedPort,
    {
        self.cycle_count += 1;

        // 1. Expiries reported from timer context (already silenced)
        shared.events.drain(|event| match event {
            Event::AlertExpired(ch) => {
                debug!("{} alert auto-off", ch);
                sink.emit(&AppEvent::AlertCleared(ch));
            }
        });

        // 2. Navigation snapshot
        let from = self.rooms.selected();
        let to = self.rooms.select(shared.nav.selected());
        if from != to {
            sink.emit(&AppEvent::RoomSelected { from, to });
        }

        // 3. Sample, scale, store
        let raw = self.sampler.sample(hw);
        let reading = self.sampler.scale(raw);
        self.rooms.current_mut().apply(reading);
        self.last_raw = raw;

        // 4. Alarm policy
        let outcome = self
            .policy
            .evaluate(self.rooms.current_mut(), &shared.alerts, hw);
        if let Some(ch) = outcome.started {
            sink.emit(&AppEvent::AlertStarted(ch));
        }

        let full_recording = shared.full_recording();
        if full_recording != self.last_full_recording {
            self.last_full_recording = full_recording;
            sink.emit(&AppEvent::FullRecordingChanged(full_recording));
        }

        // 5. Render
        let frame = self.presenter.render(
            self.rooms.current(),
            full_recording,
            outcome.level,
            &self.policy,
            hw,
        );

        // 6. Telemetry
        sink.emit(&AppEvent::Telemetry(self.build_telemetry(full_recording, outcome)));

        self.last_outcome = Some(outcome);
        self.last_frame = Some(frame);
    }

    // ── Queries ───────────────────────────────────────────────

    fn build_telemetry(&self, full_recording: bool, outcome: AlarmOutcome) -> TelemetryData {
        let room = self.rooms.current();
        TelemetryData {
            room: self.rooms.selected(),
            name: room.name.clone(),
            raw_x: self.last_raw.x,
            raw_y: self.last_raw.y,
            temperature: room.temperature,
            humidity: room.humidity,
            cam_on: room.cam_on,
            full_recording,
            level: outcome.level,
        }
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn last_outcome(&self) -> Option<AlarmOutcome> {
        self.last_outcome
    }

    /// The frame drawn by the most recent cycle.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}
