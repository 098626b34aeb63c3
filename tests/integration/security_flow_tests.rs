//! Integration tests for the SecurityService → FSM → hardware pipeline.
//!
//! These run on the host (x86_64) and verify the full chain from a panel
//! command or sensor reading down to LED/buzzer/LCD calls, using the
//! recording mocks in `mock_hw`. Default config timing: 10ms control
//! ticks, 100ms ranging cadence, 3s banner + 10 × 600ms flash cycles.

use crate::mock_hw::{HwCall, LogSink, MockHardware};

use homesentry::app::commands::MenuCommand;
use homesentry::app::events::AppEvent;
use homesentry::app::service::SecurityService;
use homesentry::config::SystemConfig;
use homesentry::drivers::buzzer::Note;
use homesentry::error::SensorError;
use homesentry::fsm::StateId;

/// Ticks for a complete alert: 3000ms banner + 10 × 600ms cycles at
/// 10ms per tick, plus slack for the entry/exit transitions.
const ALERT_TICKS: usize = 950;

fn make_app() -> (SecurityService, MockHardware, LogSink) {
    let config = SystemConfig::default();
    config.validate().expect("default config must be valid");
    let mut app = SecurityService::new(config);
    let hw = MockHardware::new();
    let mut sink = LogSink::new();
    app.start(&mut sink);
    (app, hw, sink)
}

fn run_ticks(app: &mut SecurityService, hw: &mut MockHardware, sink: &mut LogSink, n: usize) {
    for _ in 0..n {
        app.tick(hw, sink);
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_disarmed_with_menu_and_outputs_off() {
    let (mut app, mut hw, mut sink) = make_app();
    run_ticks(&mut app, &mut hw, &mut sink, 1);

    assert_eq!(app.state(), StateId::Disarmed);
    assert!(sink.contains(&AppEvent::Started(StateId::Disarmed)));

    assert!(hw.displayed("Arm System"));
    assert!(hw.displayed("Disarm System"));
    assert!(!hw.leds_currently_on());
    assert!(hw.tones().is_empty());
}

// ── Arm / disarm round trips ──────────────────────────────────

#[test]
fn arm_shows_status_then_redraws_menu() {
    let (mut app, mut hw, mut sink) = make_app();
    run_ticks(&mut app, &mut hw, &mut sink, 1);

    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Armed);
    assert!(sink.contains(&AppEvent::StateChanged {
        from: StateId::Disarmed,
        to: StateId::Armed,
    }));
    assert!(sink.contains(&AppEvent::StatusShown("System Armed")));
    assert!(hw.displayed("System Armed"));

    // After the 3s hold the main menu replaces the status line.
    run_ticks(&mut app, &mut hw, &mut sink, 305);
    assert!(hw.displayed("Arm System"));
    assert!(!hw.displayed("System Armed"));
}

#[test]
fn redundant_arm_is_a_status_not_a_transition() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);

    let transitions_before = sink.count_matching(|e| matches!(e, AppEvent::StateChanged { .. }));
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Armed);
    assert!(sink.contains(&AppEvent::StatusShown("Already Armed")));
    assert_eq!(
        sink.count_matching(|e| matches!(e, AppEvent::StateChanged { .. })),
        transitions_before,
    );
}

#[test]
fn redundant_disarm_is_a_status_not_a_transition() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Disarm, &mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Disarmed);
    assert!(sink.contains(&AppEvent::StatusShown("Already Disarmed")));
    assert!(hw.displayed("Already Disarmed"));
}

#[test]
fn disarm_halts_ranging() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    for _ in 0..10 {
        hw.queue_reading(200);
    }
    run_ticks(&mut app, &mut hw, &mut sink, 200);
    let requests_while_armed = hw.ranging_requests();
    assert!(requests_while_armed > 1, "armed monitor should keep ranging");

    app.handle_command(MenuCommand::Disarm, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Disarmed);

    for _ in 0..10 {
        hw.queue_reading(30); // even a breach-range reading must be ignored
    }
    run_ticks(&mut app, &mut hw, &mut sink, 500);
    assert_eq!(hw.ranging_requests(), requests_while_armed);
    assert_eq!(app.state(), StateId::Disarmed);
}

// ── Breach detection ──────────────────────────────────────────

#[test]
fn breach_reading_runs_full_alert_and_disarms() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    hw.queue_reading(30);

    run_ticks(&mut app, &mut hw, &mut sink, 5);
    assert_eq!(app.state(), StateId::Alerting);
    assert!(sink.contains(&AppEvent::Breach { distance_mm: 30 }));
    assert!(sink.contains(&AppEvent::AlertStarted { manual: false }));
    assert!(hw.displayed("Intruder"));
    assert!(hw.displayed("Detected"));
    let requests_at_alert = hw.ranging_requests();

    run_ticks(&mut app, &mut hw, &mut sink, ALERT_TICKS);
    assert_eq!(
        hw.ranging_requests(),
        requests_at_alert,
        "no ranging while the alert runs"
    );
    assert_eq!(app.state(), StateId::Disarmed);
    assert!(sink.contains(&AppEvent::AlertCompleted));
    assert!(sink.contains(&AppEvent::StateChanged {
        from: StateId::Alerting,
        to: StateId::Disarmed,
    }));

    // Exactly ten flashes, twenty alternating 50ms tones.
    assert_eq!(hw.leds_on_count(), 10);
    let tones = hw.tones();
    assert_eq!(tones.len(), 20);
    for (i, (note, ms)) in tones.iter().enumerate() {
        let expected = if i % 2 == 0 { Note::A4 } else { Note::G4 };
        assert_eq!(*note, expected, "tone {i} out of order");
        assert_eq!(*ms, 50);
    }

    // Everything quiet afterwards: LEDs off, buzzer forced low, menu back.
    assert!(!hw.leds_currently_on());
    assert!(hw.calls.contains(&HwCall::BuzzerOff));
    assert!(hw.displayed("Arm System"));
}

#[test]
fn distant_reading_keeps_system_armed() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    for _ in 0..40 {
        hw.queue_reading(200);
    }

    run_ticks(&mut app, &mut hw, &mut sink, 450);
    assert_eq!(app.state(), StateId::Armed);
    assert!(!sink.contains(&AppEvent::AlertStarted { manual: false }));
    assert_eq!(sink.count_matching(|e| matches!(e, AppEvent::Breach { .. })), 0);
}

#[test]
fn zero_reading_is_not_a_breach() {
    // A distance of 0 is the sensor's out-of-range marker, not an
    // adjacent object.
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    for _ in 0..20 {
        hw.queue_reading(0);
    }

    run_ticks(&mut app, &mut hw, &mut sink, 250);
    assert_eq!(app.state(), StateId::Armed);
    assert_eq!(sink.count_matching(|e| matches!(e, AppEvent::Breach { .. })), 0);
}

#[test]
fn threshold_boundary_reading_triggers() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    hw.queue_reading(50); // exactly at the threshold

    run_ticks(&mut app, &mut hw, &mut sink, 5);
    assert_eq!(app.state(), StateId::Alerting);
    assert!(sink.contains(&AppEvent::Breach { distance_mm: 50 }));
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn sensor_timeout_is_recoverable() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    hw.queue_fault(SensorError::Timeout);
    hw.queue_fault(SensorError::Timeout);
    hw.queue_reading(200);

    run_ticks(&mut app, &mut hw, &mut sink, 100);
    assert_eq!(app.state(), StateId::Armed, "faults must not disarm");
    assert_eq!(app.sensor_faults(), 2);
    assert_eq!(
        sink.count_matching(|e| *e == AppEvent::SensorFault(SensorError::Timeout)),
        2,
    );
    // The cadence keeps going after the faults.
    assert!(hw.ranging_requests() >= 3);
}

#[test]
fn failed_ranging_request_retries_next_cycle() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    hw.fail_begin = true;

    run_ticks(&mut app, &mut hw, &mut sink, 105);
    assert_eq!(app.state(), StateId::Armed);
    assert!(app.sensor_faults() >= 2, "each failed request is a fault");
    assert!(hw.ranging_requests() >= 2, "requests retry on the cadence");
}

// ── Manual trigger ────────────────────────────────────────────

#[test]
fn manual_trigger_fires_from_disarmed() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::TriggerAlert, &mut hw, &mut sink);

    assert_eq!(app.state(), StateId::Alerting);
    assert!(sink.contains(&AppEvent::AlertStarted { manual: true }));
    assert_eq!(sink.count_matching(|e| matches!(e, AppEvent::Breach { .. })), 0);

    run_ticks(&mut app, &mut hw, &mut sink, ALERT_TICKS);
    assert_eq!(app.state(), StateId::Disarmed);
    assert_eq!(hw.tones().len(), 20);
}

#[test]
fn banner_holds_before_first_tone() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::TriggerAlert, &mut hw, &mut sink);

    // 3000ms banner at 10ms per tick: nothing audible for 300 ticks.
    run_ticks(&mut app, &mut hw, &mut sink, 295);
    assert!(hw.tones().is_empty());
    assert_eq!(hw.leds_on_count(), 0);

    run_ticks(&mut app, &mut hw, &mut sink, 10);
    let tones = hw.tones();
    assert_eq!(tones.len(), 1);
    assert_eq!(tones[0], (Note::A4, 50));
    assert_eq!(hw.leds_on_count(), 1);
}

// ── Alert atomicity ───────────────────────────────────────────

#[test]
fn commands_cannot_interrupt_the_alert() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::TriggerAlert, &mut hw, &mut sink);
    run_ticks(&mut app, &mut hw, &mut sink, 400); // mid-flash

    app.handle_command(MenuCommand::Disarm, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Alerting);
    assert!(sink.contains(&AppEvent::CommandIgnored(MenuCommand::Disarm)));

    app.handle_command(MenuCommand::TriggerAlert, &mut hw, &mut sink);
    app.handle_command(MenuCommand::RedrawMenu, &mut hw, &mut sink);
    assert!(sink.contains(&AppEvent::CommandIgnored(MenuCommand::TriggerAlert)));
    assert!(sink.contains(&AppEvent::CommandIgnored(MenuCommand::RedrawMenu)));

    // Arm gets its status event, but no transition and no repaint.
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    assert_eq!(app.state(), StateId::Alerting);
    assert!(sink.contains(&AppEvent::StatusShown("Already Armed")));

    // The sequence still runs its exact cycle count to completion.
    run_ticks(&mut app, &mut hw, &mut sink, ALERT_TICKS);
    assert_eq!(app.state(), StateId::Disarmed);
    assert_eq!(hw.leds_on_count(), 10);
    assert_eq!(hw.tones().len(), 20);
    assert!(sink.contains(&AppEvent::AlertCompleted));
}

#[test]
fn alert_never_returns_to_armed() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    hw.queue_reading(10);

    run_ticks(&mut app, &mut hw, &mut sink, 5);
    assert_eq!(app.state(), StateId::Alerting);

    // Re-arming afterwards requires an explicit command.
    run_ticks(&mut app, &mut hw, &mut sink, ALERT_TICKS);
    assert_eq!(app.state(), StateId::Disarmed);
    run_ticks(&mut app, &mut hw, &mut sink, 100);
    assert_eq!(app.state(), StateId::Disarmed);
}

// ── Menu redraw ───────────────────────────────────────────────

#[test]
fn redraw_command_repaints_the_menu() {
    let (mut app, mut hw, mut sink) = make_app();
    run_ticks(&mut app, &mut hw, &mut sink, 1);
    hw.calls.clear();

    app.handle_command(MenuCommand::RedrawMenu, &mut hw, &mut sink);
    assert!(hw.displayed("Arm System"));
    assert!(hw.displayed("Disarm System"));
    assert_eq!(app.state(), StateId::Disarmed);
}

// ── Heartbeat ─────────────────────────────────────────────────

#[test]
fn heartbeat_snapshot_tracks_activity() {
    let (mut app, mut hw, mut sink) = make_app();
    app.handle_command(MenuCommand::Arm, &mut hw, &mut sink);
    hw.queue_reading(200);
    hw.queue_fault(SensorError::Timeout);
    run_ticks(&mut app, &mut hw, &mut sink, 50);

    let hb = app.build_heartbeat();
    assert_eq!(hb.state, StateId::Armed);
    assert_eq!(hb.total_ticks, 50);
    assert_eq!(hb.last_distance_mm, 200);
    assert_eq!(hb.sensor_faults, 1);
}
