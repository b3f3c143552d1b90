//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (echo timer, temperature probe, relay and LEDs, event
//! sinks, request transport) implement these traits. The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the control logic never touches hardware directly.

use crate::api::HttpResponse;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps at `u32::MAX` (~49.7 days); every
/// consumer compares instants with [`elapsed_ms`].
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Milliseconds from `since` to `now`, correct across one counter wrap.
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Outcome of one ultrasonic ranging pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Echo {
    /// Echo pulse width in microseconds.
    Received(u32),
    /// No echo within the timeout.
    TimedOut,
}

/// Fires one trigger pulse and times the echo. Blocks for at most
/// `timeout_us` plus the trigger pulse itself.
pub trait PulseTimer {
    fn ping(&mut self, timeout_us: u32) -> Echo;
}

/// Water temperature source.
pub trait TemperatureProbe {
    /// Latest temperature in °C. `now_ms` lets non-blocking probes pace
    /// their conversions.
    fn read_celsius(&mut self, now_ms: u32) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Discrete indicator outputs. All are active-high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Motor,
    Irrigation,
    SolarWash,
    ReverseOsmosis,
    Cold,
    Hot,
    /// Tank bar position, 0 = bottom.
    TankLevel(u8),
}

/// Write-side port: the domain calls this to drive outputs.
pub trait HardwareOutput {
    /// Energise (`true`) or release the pump relay. Adapters handle the
    /// relay's active-low wiring.
    fn set_relay(&mut self, on: bool);

    fn set_indicator(&mut self, indicator: Indicator, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Request port (driving adapter: transport → control loop)
// ───────────────────────────────────────────────────────────────

/// Correlates a response with the request that produced it.
pub type RequestId = u32;

/// Longest request path the control loop accepts.
pub const MAX_PATH_LEN: usize = 64;

/// A request waiting for the control loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub id: RequestId,
    pub path: heapless::String<MAX_PATH_LEN>,
}

/// Source of inbound requests, drained between control ticks.
pub trait RequestPort {
    /// Next queued request. Never blocks.
    fn try_next(&mut self) -> Option<InboundRequest>;

    /// Hand the response for `id` back to the transport.
    fn respond(&mut self, id: RequestId, response: HttpResponse);
}
