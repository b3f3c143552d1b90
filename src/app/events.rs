//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; the firmware logs them to serial.

use crate::api::status::Snapshot;
use crate::control::auxiliary::AuxKind;
use crate::control::motor::MotorTransition;
use crate::error::SensorError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The application service has started; all outputs are off.
    Started,

    /// The pump switched on or off.
    MotorChanged {
        transition: MotorTransition,
        percent: f32,
    },

    /// A manual start was refused because the tank is full.
    TankFullRejected { percent: f32 },

    AuxStarted(AuxKind),
    AuxFinished(AuxKind),

    /// The temperature probe started failing; the last good value is held.
    ProbeFault(SensorError),

    /// The temperature probe is delivering readings again.
    ProbeRecovered,

    /// Periodic telemetry snapshot.
    Telemetry(Snapshot),
}
