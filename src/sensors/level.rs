//! Tank level from ultrasonic ranging.
//!
//! The ranger sits at the top of the tank looking down. Several pings are
//! averaged per measurement; a ping that gets no echo counts as the full
//! tank height (reads as empty), so a dead sensor drives the level to 0 %
//! and the pump toward running.

use log::warn;

use crate::app::ports::{Echo, PulseTimer};
use crate::config::SystemConfig;
use crate::control::volume::volume_liters;

/// Speed of sound at ~20 °C.
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Echo round-trip time to one-way distance.
pub fn echo_to_cm(echo_us: u32) -> f32 {
    echo_us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0
}

/// One level measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelReading {
    /// Mean sensor-to-surface distance (cm).
    pub distance_cm: f32,
    /// Water column height, clamped to `[0, tank height]`.
    pub height_cm: f32,
    /// Fill level, 0–100.
    pub percent: f32,
    pub volume_liters: f32,
    /// Pings that timed out and were substituted.
    pub timeouts: u8,
}

pub struct LevelSensor {
    max_height_cm: f32,
    area_cm2: f32,
    samples: u8,
    echo_timeout_us: u32,
}

impl LevelSensor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            max_height_cm: config.tank_height_cm,
            area_cm2: config.tank_area_cm2,
            samples: config.level_samples.max(1),
            echo_timeout_us: config.echo_timeout_us,
        }
    }

    pub fn measure(&self, timer: &mut impl PulseTimer) -> LevelReading {
        let mut total_cm = 0.0;
        let mut timeouts = 0u8;
        for _ in 0..self.samples {
            total_cm += match timer.ping(self.echo_timeout_us) {
                Echo::Received(us) => echo_to_cm(us),
                Echo::TimedOut => {
                    timeouts += 1;
                    self.max_height_cm
                }
            };
        }
        if timeouts == self.samples {
            warn!("Level: no echo on any of {} pings, reading empty", self.samples);
        }

        let distance_cm = total_cm / f32::from(self.samples);
        let height_cm = (self.max_height_cm - distance_cm).clamp(0.0, self.max_height_cm);
        LevelReading {
            distance_cm,
            height_cm,
            percent: height_cm / self.max_height_cm * 100.0,
            volume_liters: volume_liters(height_cm, self.area_cm2),
            timeouts,
        }
    }
}
