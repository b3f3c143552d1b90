//! Integration tests for the cooperative control loop.

use smartwater::api::routes::Router;
use smartwater::app::events::AppEvent;
use smartwater::app::service::AppService;
use smartwater::config::SystemConfig;
use smartwater::scheduler::{ControlScheduler, PollOutcome};

use crate::mock_hw::{FakeClock, MockHardware, QueuedRequests, RecordingSink};

struct Rig {
    clock: FakeClock,
    app: AppService,
    scheduler: ControlScheduler,
    hw: MockHardware,
    router: Router,
    requests: QueuedRequests,
    sink: RecordingSink,
}

impl Rig {
    fn new(start_ms: u32) -> Self {
        let config = SystemConfig::default();
        let scheduler = ControlScheduler::new(&config);
        let mut hw = MockHardware::new();
        hw.set_level_percent(50.0);
        Self {
            clock: FakeClock::at(start_ms),
            app: AppService::new(config),
            scheduler,
            hw,
            router: Router::new("<html></html>"),
            requests: QueuedRequests::new(),
            sink: RecordingSink::new(),
        }
    }

    fn poll(&mut self) -> PollOutcome {
        self.scheduler.poll(
            &self.clock,
            &mut self.app,
            &mut self.hw,
            &self.router,
            &mut self.requests,
            &mut self.sink,
        )
    }
}

#[test]
fn first_poll_ticks_immediately() {
    let mut rig = Rig::new(12_345);
    let outcome = rig.poll();
    assert!(outcome.ticked);
    assert_eq!(rig.app.tick_count(), 1);
}

#[test]
fn ticks_follow_configured_period() {
    let mut rig = Rig::new(0);
    rig.poll();

    rig.clock.advance(199);
    assert!(!rig.poll().ticked);

    rig.clock.advance(1);
    assert!(rig.poll().ticked);

    // A late poll ticks once and re-anchors; no catch-up burst.
    rig.clock.advance(1_000);
    assert!(rig.poll().ticked);
    assert!(!rig.poll().ticked);
    assert_eq!(rig.app.tick_count(), 3);
}

#[test]
fn requests_are_answered_before_the_tick() {
    let mut rig = Rig::new(0);
    let id = rig.requests.push("/status");

    let outcome = rig.poll();
    assert_eq!(outcome.requests_served, 1);
    assert!(outcome.ticked);

    // The answer reflects the state before this poll's sensor pass.
    let body = &rig.requests.response(id).expect("answered").body;
    assert!(body.contains(r#""level":0.0"#), "{body}");
    assert_eq!(rig.app.snapshot(0).level, 50.0);
}

#[test]
fn every_queued_request_is_drained() {
    let mut rig = Rig::new(0);
    rig.poll();
    let motor = rig.requests.push("/motor");
    let irr = rig.requests.push("/irr");
    let missing = rig.requests.push("/nope");

    rig.clock.advance(10);
    let outcome = rig.poll();

    assert_eq!(outcome.requests_served, 3);
    assert!(!outcome.ticked);
    assert!(rig.requests.pending.is_empty());
    assert_eq!(rig.requests.response(motor).map(|r| r.body.as_str()), Some("Motor ON"));
    assert_eq!(rig.requests.response(irr).map(|r| r.status), Some(200));
    assert_eq!(rig.requests.response(missing).map(|r| r.status), Some(404));
}

#[test]
fn telemetry_on_its_own_period() {
    let mut rig = Rig::new(0);
    assert!(!rig.poll().telemetry_sent);

    rig.clock.advance(59_999);
    assert!(!rig.poll().telemetry_sent);

    rig.clock.advance(1);
    assert!(rig.poll().telemetry_sent);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::Telemetry(_))),
        1
    );
}

#[test]
fn telemetry_disabled_with_zero_interval() {
    let config = SystemConfig {
        telemetry_interval_ms: 0,
        ..SystemConfig::default()
    };
    let mut rig = Rig::new(0);
    rig.scheduler = ControlScheduler::new(&config);

    for _ in 0..5 {
        rig.clock.advance(120_000);
        assert!(!rig.poll().telemetry_sent);
    }
}

#[test]
fn cadence_holds_across_clock_wrap() {
    let mut rig = Rig::new(u32::MAX - 100);
    rig.poll();

    rig.clock.advance(150);
    assert!(!rig.poll().ticked, "only 150 ms elapsed across the wrap");

    rig.clock.advance(50);
    assert!(rig.poll().ticked);
    assert_eq!(rig.app.tick_count(), 2);
}
