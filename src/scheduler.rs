//! Cooperative control-loop scheduler.
//!
//! One thread owns the controller. Each [`ControlScheduler::poll`] first
//! answers every queued request, then runs a control tick if the tick
//! period has elapsed, then emits telemetry if that period has elapsed.
//! The caller spins `poll` with a short sleep; a request therefore waits
//! at most one sensor pass.
//!
//! ```text
//!  ┌────────────────────────── poll(clock) ──────────────────────────┐
//!  │                                                                 │
//!  │  RequestPort ──▶ Router.handle ──▶ respond   (until queue empty)│
//!  │                                                                 │
//!  │  now - last_tick ≥ tick_interval       ──▶ AppService.tick      │
//!  │  now - last_telemetry ≥ telemetry      ──▶ Telemetry(snapshot)  │
//!  └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All period checks use wrapping millisecond arithmetic.

use log::debug;

use crate::api::routes::Router;
use crate::app::events::AppEvent;
use crate::app::ports::{
    Clock, EventSink, HardwareOutput, PulseTimer, RequestPort, TemperatureProbe, elapsed_ms,
};
use crate::app::service::AppService;
use crate::config::SystemConfig;

/// What one [`ControlScheduler::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollOutcome {
    pub requests_served: u32,
    pub ticked: bool,
    pub telemetry_sent: bool,
}

pub struct ControlScheduler {
    tick_interval_ms: u32,
    /// 0 disables telemetry.
    telemetry_interval_ms: u32,
    last_tick_ms: Option<u32>,
    last_telemetry_ms: u32,
}

impl ControlScheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            tick_interval_ms: config.tick_interval_ms,
            telemetry_interval_ms: config.telemetry_interval_ms,
            last_tick_ms: None,
            last_telemetry_ms: 0,
        }
    }

    /// The first poll always ticks.
    fn tick_due(&self, now_ms: u32) -> bool {
        self.last_tick_ms
            .is_none_or(|last| elapsed_ms(now_ms, last) >= self.tick_interval_ms)
    }

    pub fn poll(
        &mut self,
        clock: &impl Clock,
        app: &mut AppService,
        hw: &mut (impl PulseTimer + TemperatureProbe + HardwareOutput),
        router: &Router,
        requests: &mut impl RequestPort,
        sink: &mut impl EventSink,
    ) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        while let Some(req) = requests.try_next() {
            let response = router.handle(&req.path, clock.now_ms(), app, hw, sink);
            debug!("Scheduler: #{} {} -> {}", req.id, req.path, response.status);
            requests.respond(req.id, response);
            outcome.requests_served += 1;
        }

        let now = clock.now_ms();
        if self.tick_due(now) {
            // Re-anchor on the actual tick time; a late tick never bursts.
            self.last_tick_ms = Some(now);
            app.tick(now, hw, sink);
            outcome.ticked = true;
        }

        let now = clock.now_ms();
        if self.telemetry_interval_ms > 0
            && elapsed_ms(now, self.last_telemetry_ms) >= self.telemetry_interval_ms
        {
            self.last_telemetry_ms = now;
            sink.emit(&AppEvent::Telemetry(app.snapshot(now)));
            outcome.telemetry_sent = true;
        }

        outcome
    }
}
