//! Integration tests for button edges → debounce → room selection.

use crate::mock_hw::{LogSink, MockHardware};

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

fn selections(sink: &LogSink) -> Vec<(usize, usize)> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::RoomSelected { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn next_presses_are_debounced() {
    let (mut app, shared, mut hw, mut sink) = make_app();

    assert!(shared.on_edge(InputId::Next, 0));
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(app.rooms().selected(), 1);

    assert!(!shared.on_edge(InputId::Next, 100), "bounce inside window");
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(app.rooms().selected(), 1);

    assert!(shared.on_edge(InputId::Next, 400));
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(app.rooms().selected(), 2);

    assert_eq!(selections(&sink), vec![(0, 1), (1, 2)]);
}

#[test]
fn next_clamps_at_last_room() {
    let (mut app, shared, mut hw, mut sink) = make_app();

    for i in 0..6u32 {
        shared.on_edge(InputId::Next, i * 1_000);
    }
    app.cycle(&shared, &mut hw, &mut sink);

    assert_eq!(shared.nav.selected(), 3);
    assert_eq!(app.rooms().selected(), 3);
    assert_eq!(hw.last_frame()[0], "Garage");
}

#[test]
fn previous_saturates_at_first_room() {
    let (mut app, shared, mut hw, mut sink) = make_app();

    assert!(shared.on_edge(InputId::Previous, 0));
    app.cycle(&shared, &mut hw, &mut sink);

    assert_eq!(app.rooms().selected(), 0);
    assert!(selections(&sink).is_empty());
}

#[test]
fn inputs_debounce_independently() {
    let (mut app, shared, mut hw, mut sink) = make_app();

    assert!(shared.on_edge(InputId::Next, 0));
    assert!(shared.on_edge(InputId::Next, 300));
    assert!(shared.on_edge(InputId::Previous, 310), "own window, not Next's");
    app.cycle(&shared, &mut hw, &mut sink);

    assert_eq!(app.rooms().selected(), 1);
}

#[test]
fn selected_room_name_drawn_first() {
    let (mut app, shared, mut hw, mut sink) = make_app();

    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(hw.last_frame()[0], "Living Room");

    shared.on_edge(InputId::Next, 0);
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(hw.last_frame()[0], "Kitchen");
}

#[test]
fn each_room_keeps_its_own_reading() {
    let (mut app, shared, mut hw, mut sink) = make_app();

    hw.set_temperature(10.0);
    app.cycle(&shared, &mut hw, &mut sink);

    shared.on_edge(InputId::Next, 0);
    hw.set_temperature(30.0);
    app.cycle(&shared, &mut hw, &mut sink);

    let temps: Vec<f32> = app.rooms().iter().map(|r| r.temperature).collect();
    assert!((temps[0] - 10.0).abs() < 0.1);
    assert!((temps[1] - 30.0).abs() < 0.1);
    assert_eq!(temps[2], 0.0);
}
