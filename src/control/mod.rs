//! Control logic: one module per component, all operating on the single
//! [`ControllerState`] aggregate.
//!
//! Every component takes the state it mutates by `&mut` and the outputs it
//! drives through [`HardwareOutput`](crate::app::ports::HardwareOutput), so
//! each one can be constructed and exercised in isolation.

pub mod auxiliary;
pub mod motor;
pub mod tank_leds;
pub mod thermal;
pub mod volume;

#[cfg(test)]
pub(crate) mod fakes;

use crate::config::SystemConfig;
use auxiliary::AuxScheduler;
use motor::MotorState;
use thermal::ThermalState;

/// Tank geometry plus the values derived from the latest level pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankState {
    /// Configured max depth (cm).
    pub height_cm: f32,
    /// Cross-section (cm²).
    pub area_cm2: f32,
    /// Fill level, 0–100.
    pub percent: f32,
    /// Volume at the previous tick (L).
    pub last_volume_liters: f32,
    /// Litres added while refilling since boot. Never decreases.
    pub monthly_liters: f32,
}

impl TankState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            height_cm: config.tank_height_cm,
            area_cm2: config.tank_area_cm2,
            percent: 0.0,
            last_volume_liters: 0.0,
            monthly_liters: 0.0,
        }
    }
}

/// Everything the controller knows. Owned by the
/// [`AppService`](crate::app::service::AppService); volatile.
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub tank: TankState,
    pub motor: MotorState,
    pub aux: AuxScheduler,
    pub thermal: ThermalState,
    /// Tank bar positions currently lit.
    pub tank_leds_lit: u8,
}

impl ControllerState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            tank: TankState::new(config),
            motor: MotorState::default(),
            aux: AuxScheduler::new(config),
            thermal: ThermalState::default(),
            tank_leds_lit: 0,
        }
    }
}
