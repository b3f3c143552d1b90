//! Monthly usage counter.

use log::debug;

use super::TankState;

/// Litres held at `height_cm` of water over `area_cm2`.
pub fn volume_liters(height_cm: f32, area_cm2: f32) -> f32 {
    height_cm * area_cm2 / 1000.0
}

pub struct VolumeAccumulator;

impl VolumeAccumulator {
    /// Fold this tick's water height into `tank`.
    ///
    /// `motor_running` must be the motor state from *before* this tick's
    /// motor update. Usage only grows while the pump runs and the volume
    /// rose; `last_volume_liters` always tracks the newest reading.
    pub fn accumulate(tank: &mut TankState, height_cm: f32, motor_running: bool) -> f32 {
        let volume = volume_liters(height_cm, tank.area_cm2);
        if motor_running && volume > tank.last_volume_liters {
            let added = volume - tank.last_volume_liters;
            tank.monthly_liters += added;
            debug!("Volume: +{:.1} L (month {:.1} L)", added, tank.monthly_liters);
        }
        tank.last_volume_liters = volume;
        volume
    }
}
