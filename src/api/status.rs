//! `/status` snapshot.

use serde::Serialize;

use crate::control::ControllerState;
use crate::control::auxiliary::{AuxKind, AuxSubsystem};

/// Point-in-time projection of the controller state. Built per request and
/// dropped; two captures of the same state at the same `now` serialize to
/// identical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    /// Tank level (%).
    pub level: f32,
    /// Litres pumped in since boot.
    pub month: f32,
    /// Water temperature (°C).
    pub temp: f32,
    pub motor: bool,
    /// Seconds left in the irrigation run; 0 when idle.
    pub irr: u32,
    pub sol: u32,
    pub ro: u32,
    /// Seconds until irrigation is next due; 0 while running.
    #[serde(rename = "irrNext")]
    pub irr_next: u32,
    #[serde(rename = "solNext")]
    pub sol_next: u32,
    #[serde(rename = "roNext")]
    pub ro_next: u32,
}

/// Round to one decimal place.
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

impl Snapshot {
    pub fn capture(state: &ControllerState, now_ms: u32) -> Self {
        let irr = state.aux.get(AuxKind::Irrigation);
        let sol = state.aux.get(AuxKind::SolarWash);
        let ro = state.aux.get(AuxKind::ReverseOsmosis);
        let remaining = |s: &AuxSubsystem| s.remaining_run_secs(now_ms);
        let next = |s: &AuxSubsystem| s.next_eligible_secs(now_ms);

        Self {
            level: round1(state.tank.percent),
            month: round1(state.tank.monthly_liters),
            temp: round1(state.thermal.temperature_c),
            motor: state.motor.running,
            irr: remaining(irr),
            sol: remaining(sol),
            ro: remaining(ro),
            irr_next: next(irr),
            sol_next: next(sol),
            ro_next: next(ro),
        }
    }

    pub fn to_json(&self) -> String {
        // Only numbers and booleans; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
