//! Integration tests for the request router against a live service.

use smartwater::api::routes::Router;
use smartwater::api::{CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, CONTENT_TYPE_TEXT};
use smartwater::app::events::AppEvent;
use smartwater::app::service::AppService;
use smartwater::config::SystemConfig;

use crate::mock_hw::{MockHardware, RecordingSink};

const DASHBOARD: &str = "<html><body>SmartWater</body></html>";

fn make_app(level: f32) -> (AppService, MockHardware, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    hw.set_level_percent(level);
    app.start(&mut hw, &mut sink);
    app.tick(0, &mut hw, &mut sink);
    (app, hw, sink)
}

#[test]
fn dashboard_served_at_root() {
    let (mut app, mut hw, mut sink) = make_app(50.0);
    let r = Router::new(DASHBOARD).handle("/", 0, &mut app, &mut hw, &mut sink);
    assert_eq!(r.status, 200);
    assert_eq!(r.content_type, CONTENT_TYPE_HTML);
    assert_eq!(r.body, DASHBOARD);
}

#[test]
fn status_is_json_snapshot() {
    let (mut app, mut hw, mut sink) = make_app(50.0);
    let r = Router::new(DASHBOARD).handle("/status", 0, &mut app, &mut hw, &mut sink);
    assert_eq!(r.status, 200);
    assert_eq!(r.content_type, CONTENT_TYPE_JSON);

    let v: serde_json::Value = serde_json::from_str(&r.body).expect("valid json");
    assert_eq!(v["level"], 50.0);
    assert_eq!(v["motor"], false);
    assert_eq!(v["irrNext"], 86_400);
    assert_eq!(v["roNext"], 43_200);
}

#[test]
fn motor_toggle_round_trip() {
    let (mut app, mut hw, mut sink) = make_app(50.0);
    let router = Router::new(DASHBOARD);

    let on = router.handle("/motor", 0, &mut app, &mut hw, &mut sink);
    assert_eq!((on.status, on.body.as_str()), (200, "Motor ON"));
    assert_eq!(on.content_type, CONTENT_TYPE_TEXT);
    assert_eq!(hw.relay(), Some(true));

    let off = router.handle("/motor", 0, &mut app, &mut hw, &mut sink);
    assert_eq!((off.status, off.body.as_str()), (200, "Motor OFF"));
    assert_eq!(hw.relay(), Some(false));
}

#[test]
fn motor_start_forbidden_when_full() {
    let (mut app, mut hw, mut sink) = make_app(97.0);
    let r = Router::new(DASHBOARD).handle("/motor", 0, &mut app, &mut hw, &mut sink);
    assert_eq!(r.status, 403);
    assert_eq!(r.body, "Tank Full, cannot start motor");
    assert!(!app.state().motor.running);
}

#[test]
fn aux_shortcuts_and_named_routes() {
    let (mut app, mut hw, mut sink) = make_app(50.0);
    let router = Router::new(DASHBOARD);

    for path in ["/irr", "/solar", "/ro", "/aux/irrigation", "/aux/solarWash", "/aux/ro"] {
        let r = router.handle(path, 1_000, &mut app, &mut hw, &mut sink);
        assert_eq!((r.status, r.body.as_str()), (200, "OK"), "{path}");
    }
    assert!(app.state().aux.iter().all(|s| s.running));
}

#[test]
fn unknown_subsystem_is_bad_request() {
    let (mut app, mut hw, mut sink) = make_app(50.0);
    hw.calls.clear();
    sink.events.clear();
    let r = Router::new(DASHBOARD).handle("/aux/heater", 0, &mut app, &mut hw, &mut sink);
    assert_eq!(r.status, 400);
    assert_eq!(r.body, "Unknown subsystem");
    assert!(hw.calls.is_empty());
    assert!(sink.events.is_empty());
}

#[test]
fn toggle_refused_at_full_tank_emits_rejection() {
    let (mut app, mut hw, mut sink) = make_app(96.0);
    sink.events.clear();
    let r = Router::new(DASHBOARD).handle("/motor", 0, &mut app, &mut hw, &mut sink);
    assert_eq!(r.status, 403);
    assert!(matches!(
        sink.events.as_slice(),
        [AppEvent::TankFullRejected { .. }]
    ));
}

#[test]
fn unknown_path_is_not_found() {
    let (mut app, mut hw, mut sink) = make_app(50.0);
    let r = Router::new(DASHBOARD).handle("/favicon.ico", 0, &mut app, &mut hw, &mut sink);
    assert_eq!(r.status, 404);
}
