//! Integration tests for the alert lifecycle:
//! threshold → Playing → auto-off timer → silenced → re-armable.

use crate::mock_hw::{HwCall, LogSink, MockHardware};

use roomwatch::alarm::AlertChannel;
use roomwatch::app::events::AppEvent;
use roomwatch::app::service::MonitorService;
use roomwatch::config::MonitorConfig;
use roomwatch::shared::SharedState;

fn make_app() -> (MonitorService, SharedState, MockHardware, LogSink) {
    let mut app = MonitorService::new(MonitorConfig::default());
    let shared = SharedState::new(4);
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&shared, &mut sink);
    (app, shared, hw, sink)
}

fn plays(hw: &MockHardware, ch: AlertChannel) -> usize {
    hw.count(|c| matches!(c, HwCall::Play { ch: c_ch, .. } if *c_ch == ch))
}

fn silences(hw: &MockHardware, ch: AlertChannel) -> usize {
    hw.count(|c| *c == HwCall::Silence(ch))
}

#[test]
fn cold_room_sounds_low_alert_once() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(5.0);

    app.cycle(&shared, &mut hw, &mut sink);
    assert!(shared.alerts.is_playing(AlertChannel::Low));
    assert!(hw.calls.contains(&HwCall::Play { ch: AlertChannel::Low, hz: 440 }));
    assert!(hw.calls.contains(&HwCall::Schedule { delay_ms: 5_000, ch: AlertChannel::Low }));
    assert_eq!(hw.pending(AlertChannel::Low), Some(5_000));

    // Re-evaluated 100 ms later: no second tone, no second timer.
    hw.advance_to(100, &shared);
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(plays(&hw, AlertChannel::Low), 1);
    assert_eq!(hw.count(|c| matches!(c, HwCall::Schedule { .. })), 1);
    assert_eq!(sink.count(|e| *e == AppEvent::AlertStarted(AlertChannel::Low)), 1);
    assert!(!shared.alerts.is_playing(AlertChannel::High));
}

#[test]
fn hot_room_sounds_high_alert() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(50.0);

    app.cycle(&shared, &mut hw, &mut sink);
    assert!(hw.calls.contains(&HwCall::Play { ch: AlertChannel::High, hz: 1_000 }));
    assert!(shared.alerts.is_playing(AlertChannel::High));
    assert!(!shared.alerts.is_playing(AlertChannel::Low));
}

fn alert_calls(hw: &MockHardware) -> Vec<&HwCall> {
    hw.calls
        .iter()
        .filter(|c| matches!(c, HwCall::Play { .. } | HwCall::Silence(_) | HwCall::Schedule { .. }))
        .collect()
}

#[test]
fn auto_off_silences_at_expiry() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(5.0);
    app.cycle(&shared, &mut hw, &mut sink);

    hw.set_temperature(25.0); // back in range before expiry
    hw.advance_to(4_999, &shared);
    assert_eq!(silences(&hw, AlertChannel::Low), 0);

    hw.advance_to(5_000, &shared);
    assert_eq!(silences(&hw, AlertChannel::Low), 1, "silenced by the timer itself");
    assert!(!shared.alerts.is_playing(AlertChannel::Low));

    // The cycle only reports the expiry.
    app.cycle(&shared, &mut hw, &mut sink);
    assert_eq!(silences(&hw, AlertChannel::Low), 1);
    assert_eq!(sink.count(|e| *e == AppEvent::AlertCleared(AlertChannel::Low)), 1);
    assert_eq!(plays(&hw, AlertChannel::Low), 1);
    assert!(shared.events.is_empty());
}

#[test]
fn persistent_cold_rearms_after_expiry() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(5.0);
    app.cycle(&shared, &mut hw, &mut sink);

    hw.clear_calls();
    hw.advance_to(5_000, &shared);
    app.cycle(&shared, &mut hw, &mut sink);

    assert_eq!(
        alert_calls(&hw),
        vec![
            &HwCall::Silence(AlertChannel::Low),
            &HwCall::Play { ch: AlertChannel::Low, hz: 440 },
            &HwCall::Schedule { delay_ms: 5_000, ch: AlertChannel::Low },
        ]
    );
    assert_eq!(hw.pending(AlertChannel::Low), Some(10_000));
}

#[test]
fn expiry_mid_cycle_never_cuts_the_new_tone() {
    let shared: &'static SharedState = Box::leak(Box::new(SharedState::new(4)));
    let mut app = MonitorService::new(MonitorConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(shared, &mut sink);

    hw.set_temperature(5.0);
    app.cycle(shared, &mut hw, &mut sink);

    // The timer fires between the sensor read and the alarm evaluation:
    // the old tone is cut before the same cycle re-arms.
    hw.clear_calls();
    hw.now_ms = 5_000;
    hw.expire_during_sample = Some((shared, AlertChannel::Low));
    app.cycle(shared, &mut hw, &mut sink);
    assert_eq!(
        alert_calls(&hw),
        vec![
            &HwCall::Silence(AlertChannel::Low),
            &HwCall::Play { ch: AlertChannel::Low, hz: 440 },
            &HwCall::Schedule { delay_ms: 5_000, ch: AlertChannel::Low },
        ]
    );
    assert!(shared.alerts.is_playing(AlertChannel::Low));

    // Reporting the expiry later leaves the new tone alone.
    hw.advance_to(5_500, shared);
    app.cycle(shared, &mut hw, &mut sink);
    assert_eq!(silences(&hw, AlertChannel::Low), 1);
    assert!(shared.alerts.is_playing(AlertChannel::Low));
    assert_eq!(sink.count(|e| *e == AppEvent::AlertCleared(AlertChannel::Low)), 1);
}

#[test]
fn alert_follows_selected_room_only() {
    let (mut app, shared, mut hw, mut sink) = make_app();
    hw.set_temperature(25.0);
    app.cycle(&shared, &mut hw, &mut sink);

    shared.nav.select(2);
    hw.set_temperature(50.0);
    app.cycle(&shared, &mut hw, &mut sink);

    assert_eq!(app.rooms().selected(), 2);
    assert!(app.rooms().current().temperature > 44.0);
    let first = app.rooms().get(0).map(|r| r.temperature).unwrap_or_default();
    assert!((first - 25.0).abs() < 0.1, "unselected room keeps its last reading");
    assert!(shared.alerts.is_playing(AlertChannel::High));
}
