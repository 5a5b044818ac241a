//! Integration tests for the MonitorService cycle pipeline:
//! sample → scale → room update → alarm → render → telemetry.

use crate::mock_hw::{HwCall, LogSink, MockHardware};

use roomwatch::alarm::LedLevel;
use roomwatch::app::events::AppEvent;
use roomwatch::app::service::MonitorService;
use roomwatch::config::MonitorConfig;
use roomwatch::drivers::button::InputId;
use roomwatch::shared::SharedState;

fn make_app() -> (MonitorService, SharedState, MockHardware, LogSink) {
    let mut app = MonitorService::new(MonitorConfig::default());
    let shared = SharedState::new(4);
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&shared, &mut sink);
    (app, shared, hw, sink)
}

#[test]
fn warm_room_shows_camera_on_without_alert() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(40.0);
    hw.raw_x = 2048;

    app.cycle(&shared, &mut hw, &mut sink);

    let room = app.rooms().current();
    assert!(room.cam_on);
    assert!((room.temperature - 40.0).abs() < 0.1);
    assert!((room.humidity - 50.0).abs() < 0.1);
    assert_eq!(
        hw.last_frame(),
        vec!["Living Room", "Temp:40°", "Hum:50%", "Cam:On"]
    );
    assert_eq!(hw.count(|c| matches!(c, HwCall::Play { .. })), 0);
    assert_eq!(app.last_outcome().map(|o| o.level), Some(LedLevel::High));
}

#[test]
fn full_recording_overrides_camera_text() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(40.0);
    assert!(shared.on_edge(InputId::Record, 0));

    app.cycle(&shared, &mut hw, &mut sink);

    assert_eq!(hw.last_frame()[3], "Cam:Full");
    assert!(app.rooms().current().cam_on, "per-room flag still derived");
    assert_eq!(sink.count(|e| *e == AppEvent::FullRecordingChanged(true)), 1);

    // Toggled back: override clears, one more change event.
    assert!(shared.on_edge(InputId::Record, 1_000));
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(hw.last_frame()[3], "Cam:On");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::FullRecordingChanged(_))), 2);
}

#[test]
fn render_order_is_screen_then_strip_then_led() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(25.0);

    app.cycle(&shared, &mut hw, &mut sink);

    let order: Vec<&HwCall> = hw
        .calls
        .iter()
        .filter(|c| !matches!(c, HwCall::DrawText { .. }))
        .collect();
    assert_eq!(
        order,
        vec![
            &HwCall::ClearScreen,
            &HwCall::FlushScreen,
            &HwCall::ClearStrip,
            &HwCall::FlushStrip,
            &HwCall::SetLed { r: 0, g: 31, b: 0 },
        ]
    );
    assert_eq!(hw.lit_pixels(), vec![10, 11, 12, 13, 14]);
}

#[test]
fn text_lines_drawn_at_fixed_origins() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    app.cycle(&shared, &mut hw, &mut sink);

    let origins: Vec<(i32, i32)> = hw
        .calls
        .iter()
        .filter_map(|c| match c {
            HwCall::DrawText { x, y, .. } => Some((*x, *y)),
            _ => None,
        })
        .collect();
    assert_eq!(origins, vec![(4, 4), (4, 18), (4, 32), (4, 46)]);
}

#[test]
fn telemetry_emitted_every_cycle() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.raw_x = 1024;
    hw.raw_y = 3072;

    for _ in 0..3 {
        app.cycle(&shared, &mut hw, &mut sink);
    }

    assert_eq!(app.cycle_count(), 3);
    let telem: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(t.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(telem.len(), 3);
    let t = &telem[2];
    assert_eq!((t.raw_x, t.raw_y), (1024, 3072));
    assert!((t.temperature - 45.0).abs() < 0.01);
    assert_eq!(t.level, LedLevel::VeryHigh);
    assert_eq!(t.name.as_str(), "Living Room");
}

#[test]
fn configured_room_names_are_shown() {
    let mut config = MonitorConfig::default();
    config.room_names[0] = roomwatch::rooms::room_name("Office");
    let mut app = MonitorService::new(config);
    let shared = SharedState::new(4);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&shared, &mut sink);

    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(hw.last_frame()[0], "Office");
}
