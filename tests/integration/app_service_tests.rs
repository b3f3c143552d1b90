//! Integration tests for the AppService → controllers → outputs pipeline.
//!
//! These run on the host (x86_64) and drive whole scenarios through the
//! public service API with scripted level and temperature inputs.

use smartwater::app::commands::{AppCommand, CommandOutcome};
use smartwater::app::events::AppEvent;
use smartwater::app::ports::Indicator;
use smartwater::app::service::AppService;
use smartwater::config::SystemConfig;
use smartwater::control::auxiliary::AuxKind;
use smartwater::control::motor::MotorTransition;
use smartwater::error::{ControlError, SensorError};

use crate::mock_hw::{MockHardware, OutputCall, RecordingSink};

fn make_app() -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);
    hw.calls.clear();
    sink.events.clear();
    (app, hw, sink)
}

fn toggle(
    app: &mut AppService,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
) -> Result<CommandOutcome, ControlError> {
    app.handle_command(AppCommand::ToggleMotor, 0, hw, sink)
}

fn trigger(
    app: &mut AppService,
    kind: AuxKind,
    now_ms: u32,
    hw: &mut MockHardware,
    sink: &mut RecordingSink,
) {
    let outcome = app.handle_command(AppCommand::TriggerAux(kind), now_ms, hw, sink);
    assert_eq!(outcome, Ok(CommandOutcome::AuxTriggered(kind)));
}

fn motor_changes(sink: &RecordingSink) -> Vec<MotorTransition> {
    sink.events
        .iter()
        .filter_map(|e| match e {
            AppEvent::MotorChanged { transition, .. } => Some(*transition),
            _ => None,
        })
        .collect()
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_drives_every_output_off() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    app.start(&mut hw, &mut sink);

    assert_eq!(hw.relay(), Some(false));
    for i in 0..8 {
        assert_eq!(hw.indicator(Indicator::TankLevel(i)), Some(false));
    }
    assert_eq!(hw.indicator(Indicator::Hot), Some(false));
    assert_eq!(sink.events, vec![AppEvent::Started]);
    assert!(!app.state().motor.running);
}

// ── Level ─────────────────────────────────────────────────────

#[test]
fn dead_ranger_reads_empty_and_starts_pump() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.echo_us = None;

    app.tick(0, &mut hw, &mut sink);

    let reading = app.last_reading().copied().expect("tick ran");
    assert_eq!(reading.percent, 0.0);
    assert_eq!(reading.timeouts, 5);
    assert_eq!(hw.pings, 5);
    // Fail-open: an empty reading turns the pump on.
    assert!(app.state().motor.running);
    assert_eq!(motor_changes(&sink), vec![MotorTransition::AutoStart]);
}

// ── Automatic motor rules ─────────────────────────────────────

#[test]
fn falling_through_start_threshold_starts_once() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_level_percent(31.0);
    app.tick(0, &mut hw, &mut sink);
    assert!(!app.state().motor.running);

    hw.set_level_percent(29.0);
    app.tick(200, &mut hw, &mut sink);
    assert!(app.state().motor.running);
    assert_eq!(hw.relay(), Some(true));

    // Anywhere inside the dead band: no further transition.
    let relay_writes = hw.relay_writes();
    for (i, pct) in [35.0, 50.0, 70.0, 89.0].into_iter().enumerate() {
        hw.set_level_percent(pct);
        app.tick(400 + i as u32 * 200, &mut hw, &mut sink);
    }
    assert_eq!(hw.relay_writes(), relay_writes);
    assert_eq!(motor_changes(&sink), vec![MotorTransition::AutoStart]);
}

#[test]
fn rising_through_stop_threshold_stops_once() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(20.0);
    app.tick(0, &mut hw, &mut sink);

    hw.set_level_percent(89.0);
    app.tick(200, &mut hw, &mut sink);
    assert!(app.state().motor.running);

    hw.set_level_percent(91.0);
    app.tick(400, &mut hw, &mut sink);
    hw.set_level_percent(93.0);
    app.tick(600, &mut hw, &mut sink);

    assert!(!app.state().motor.running);
    assert_eq!(hw.relay(), Some(false));
    assert_eq!(
        motor_changes(&sink),
        vec![MotorTransition::AutoStart, MotorTransition::AutoStop]
    );
}

// ── Manual control ────────────────────────────────────────────

#[test]
fn toggle_refused_when_tank_full() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(96.0);
    app.tick(0, &mut hw, &mut sink);
    hw.calls.clear();

    let result = toggle(&mut app, &mut hw, &mut sink);

    assert_eq!(result, Err(ControlError::TankFull));
    assert!(!app.state().motor.running);
    assert!(!app.state().motor.manual_override);
    assert!(!hw.calls.iter().any(|c| matches!(c, OutputCall::Relay(_))));
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::TankFullRejected { .. })
    ));
}

#[test]
fn manual_run_stops_at_limit_then_auto_rules_resume() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(80.0);
    app.tick(0, &mut hw, &mut sink);

    assert_eq!(
        toggle(&mut app, &mut hw, &mut sink),
        Ok(CommandOutcome::Motor { running: true })
    );
    assert!(app.state().motor.manual_override);

    // Past the automatic stop threshold, still under the manual limit.
    hw.set_level_percent(93.0);
    app.tick(200, &mut hw, &mut sink);
    assert!(app.state().motor.running);

    hw.set_level_percent(96.0);
    app.tick(400, &mut hw, &mut sink);
    assert!(!app.state().motor.running);
    assert!(!app.state().motor.manual_override);

    // The level drop is picked up by the automatic rule on the next tick,
    // not by the manual latch.
    hw.set_level_percent(20.0);
    app.tick(600, &mut hw, &mut sink);
    assert!(app.state().motor.running);
    assert!(!app.state().motor.manual_override);
    assert_eq!(
        motor_changes(&sink),
        vec![
            MotorTransition::ManualStart,
            MotorTransition::ManualLimitStop,
            MotorTransition::AutoStart,
        ]
    );
}

#[test]
fn handle_command_reports_outcome() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(50.0);
    app.tick(0, &mut hw, &mut sink);

    let outcome = app.handle_command(AppCommand::ToggleMotor, 0, &mut hw, &mut sink);
    assert_eq!(outcome, Ok(CommandOutcome::Motor { running: true }));

    let outcome = app.handle_command(
        AppCommand::TriggerAux(AuxKind::SolarWash),
        0,
        &mut hw,
        &mut sink,
    );
    assert_eq!(outcome, Ok(CommandOutcome::AuxTriggered(AuxKind::SolarWash)));
    assert_eq!(hw.indicator(Indicator::SolarWash), Some(true));
}

// ── Auxiliary subsystems ──────────────────────────────────────

#[test]
fn irrigation_run_window() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(50.0);

    trigger(&mut app, AuxKind::Irrigation, 5_000, &mut hw, &mut sink);
    assert_eq!(hw.indicator(Indicator::Irrigation), Some(true));

    let snap = app.snapshot(5_000);
    assert_eq!(snap.irr, 10);
    assert_eq!(snap.irr_next, 0);

    app.tick(14_999, &mut hw, &mut sink);
    assert!(app.state().aux.get(AuxKind::Irrigation).running);

    app.tick(15_000, &mut hw, &mut sink);
    assert!(!app.state().aux.get(AuxKind::Irrigation).running);
    assert_eq!(hw.indicator(Indicator::Irrigation), Some(false));
    assert_eq!(
        sink.count(|e| *e == AppEvent::AuxFinished(AuxKind::Irrigation)),
        1
    );

    // Cooldown counts down from the start of the run.
    let snap = app.snapshot(15_000);
    assert_eq!(snap.irr, 0);
    assert_eq!(snap.irr_next, 86_390);
}

#[test]
fn run_window_survives_clock_wrap() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(50.0);
    let start = u32::MAX - 3_000;

    trigger(&mut app, AuxKind::ReverseOsmosis, start, &mut hw, &mut sink);
    // 5 s after the start, the counter has wrapped.
    let later = start.wrapping_add(5_000);
    assert_eq!(app.snapshot(later).ro, 5);

    app.tick(later, &mut hw, &mut sink);
    assert!(app.state().aux.get(AuxKind::ReverseOsmosis).running);

    app.tick(start.wrapping_add(10_000), &mut hw, &mut sink);
    assert!(!app.state().aux.get(AuxKind::ReverseOsmosis).running);
}

// ── Volume ────────────────────────────────────────────────────

#[test]
fn usage_only_counts_while_pumping() {
    let (mut app, mut hw, mut sink) = make_app();

    // Motor off the whole time (starts at 50 %, never crosses 30 %).
    for (i, pct) in [50.0, 60.0, 70.0].into_iter().enumerate() {
        hw.set_level_percent(pct);
        app.tick(i as u32 * 200, &mut hw, &mut sink);
    }
    assert_eq!(app.state().tank.monthly_liters, 0.0);

    // Drop below the start threshold, then refill while running.
    hw.set_level_percent(25.0);
    app.tick(1_000, &mut hw, &mut sink);
    assert!(app.state().motor.running);
    let baseline = app.state().tank.monthly_liters;

    hw.set_level_percent(35.0);
    app.tick(1_200, &mut hw, &mut sink);
    let added = app.state().tank.monthly_liters - baseline;
    // 10 cm over 10 000 cm² is 100 L.
    assert!((added - 100.0).abs() < 0.5, "added {added}");
}

// ── Thermal ───────────────────────────────────────────────────

#[test]
fn thermal_indicators_follow_readings() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(50.0);

    hw.temperature = Ok(35.0);
    app.tick(0, &mut hw, &mut sink);
    assert_eq!(hw.indicator(Indicator::Cold), Some(true));
    assert_eq!(hw.indicator(Indicator::Hot), Some(false));

    hw.temperature = Ok(50.0);
    app.tick(200, &mut hw, &mut sink);
    assert_eq!(hw.indicator(Indicator::Cold), Some(false));
    assert_eq!(hw.indicator(Indicator::Hot), Some(false));

    hw.temperature = Ok(60.0);
    app.tick(400, &mut hw, &mut sink);
    assert_eq!(hw.indicator(Indicator::Hot), Some(true));
}

#[test]
fn probe_fault_holds_last_value_and_reports_once() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(50.0);

    hw.temperature = Ok(65.0);
    app.tick(0, &mut hw, &mut sink);

    hw.temperature = Err(SensorError::ProbeDisconnected);
    app.tick(200, &mut hw, &mut sink);
    app.tick(400, &mut hw, &mut sink);
    assert_eq!(app.state().thermal.temperature_c, 65.0);
    assert_eq!(hw.indicator(Indicator::Hot), Some(true));
    assert_eq!(
        sink.count(|e| *e == AppEvent::ProbeFault(SensorError::ProbeDisconnected)),
        1
    );

    hw.temperature = Ok(30.0);
    app.tick(600, &mut hw, &mut sink);
    assert_eq!(sink.count(|e| *e == AppEvent::ProbeRecovered), 1);
    assert_eq!(app.snapshot(600).temp, 30.0);
}

#[test]
fn pending_conversion_is_not_a_fault() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(50.0);
    hw.temperature = Err(SensorError::ConversionPending);
    app.tick(0, &mut hw, &mut sink);
    assert_eq!(app.state().thermal.fault, None);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::ProbeFault(_))), 0);
}

// ── Tank LEDs ─────────────────────────────────────────────────

#[test]
fn tank_bar_tracks_level() {
    let (mut app, mut hw, mut sink) = make_app();

    hw.set_level_percent(50.0);
    app.tick(0, &mut hw, &mut sink);
    assert_eq!(app.state().tank_leds_lit, 4);
    assert_eq!(hw.indicator(Indicator::TankLevel(3)), Some(true));
    assert_eq!(hw.indicator(Indicator::TankLevel(4)), Some(false));

    hw.set_level_percent(100.0);
    app.tick(200, &mut hw, &mut sink);
    assert_eq!(app.state().tank_leds_lit, 8);
    assert_eq!(hw.indicator(Indicator::TankLevel(7)), Some(true));
}

// ── Snapshot ──────────────────────────────────────────────────

#[test]
fn snapshot_is_pure_and_repeatable() {
    let (mut app, mut hw, mut sink) = make_app();
    hw.set_level_percent(42.0);
    app.tick(0, &mut hw, &mut sink);
    trigger(&mut app, AuxKind::SolarWash, 100, &mut hw, &mut sink);

    let ticks = app.tick_count();
    let calls = hw.calls.len();
    let a = app.snapshot(3_100).to_json();
    let b = app.snapshot(3_100).to_json();

    assert_eq!(a, b);
    assert_eq!(app.tick_count(), ticks);
    assert_eq!(hw.calls.len(), calls);
    assert!(a.contains(r#""sol":7"#), "{a}");
}
