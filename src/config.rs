//! System configuration parameters
//!
//! All tunable parameters for the SmartWater controller. Values are
//! collaborator-owned (compiled in or supplied as JSON at bring-up); nothing
//! here is persisted by the controller.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on tank-level LED positions.
pub const MAX_TANK_LEDS: u8 = 16;
/// Upper bound on steps in a custom tier table.
pub const MAX_TIER_STEPS: usize = 16;
/// Upper bound on ranging samples per measurement.
pub const MAX_LEVEL_SAMPLES: u8 = 16;

/// Run window and display-only cooldown of one auxiliary subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxTiming {
    /// Cooldown shown to the dashboard as "next eligible". Never enforced.
    pub interval_ms: u32,
    /// How long a triggered run stays active.
    pub run_ms: u32,
}

/// Heater indicator thresholds.
///
/// Two deployments disagree here: one lights cold/hot around a single
/// 40 °C crossover, the other leaves a 40–60 °C band where neither is lit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThermalPolicy {
    SingleCrossover { threshold_c: f32 },
    SplitBand { cold_below_c: f32, hot_at_or_above_c: f32 },
}

impl ThermalPolicy {
    pub fn cold_below_c(&self) -> f32 {
        match *self {
            Self::SingleCrossover { threshold_c } => threshold_c,
            Self::SplitBand { cold_below_c, .. } => cold_below_c,
        }
    }

    pub fn hot_at_or_above_c(&self) -> f32 {
        match *self {
            Self::SingleCrossover { threshold_c } => threshold_c,
            Self::SplitBand {
                hot_at_or_above_c, ..
            } => hot_at_or_above_c,
        }
    }
}

/// One row of a tier table: `lit` LEDs when the level is below `below_percent`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierStep {
    pub below_percent: f32,
    pub lit: u8,
}

/// How the tank percentage maps onto the LED bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierPolicy {
    /// Integer linear map of 0–100 % onto `0..=leds` lit positions.
    Proportional { leds: u8 },
    /// `<30` → 1, `<70` → 2, otherwise 3.
    ThreeTier,
    /// Explicit table evaluated top-down; `full` when no step matches.
    Table {
        steps: Vec<TierStep, MAX_TIER_STEPS>,
        full: u8,
    },
}

impl TierPolicy {
    /// Number of physical LED positions the policy drives.
    pub fn positions(&self) -> u8 {
        match self {
            Self::Proportional { leds } => *leds,
            Self::ThreeTier => 3,
            Self::Table { steps, full } => steps.iter().map(|s| s.lit).fold(*full, u8::max),
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Tank ---
    /// Distance from the sensor to the tank floor (cm); 100 % level is 0 cm.
    pub tank_height_cm: f32,
    /// Horizontal cross-section of the tank (cm²).
    pub tank_area_cm2: f32,

    // --- Motor ---
    /// Automatic start when the level drops strictly below this (%).
    pub motor_start_below_percent: f32,
    /// Automatic stop when the level rises strictly above this (%).
    pub motor_stop_above_percent: f32,
    /// Manual runs stop here; manual starts are refused at or above it (%).
    pub manual_stop_percent: f32,

    // --- Auxiliary subsystems ---
    pub irrigation: AuxTiming,
    pub solar_wash: AuxTiming,
    pub ro: AuxTiming,

    // --- Indicators ---
    pub thermal: ThermalPolicy,
    pub tank_leds: TierPolicy,

    // --- Timing ---
    /// Control tick period (milliseconds)
    pub tick_interval_ms: u32,
    /// Telemetry log period (milliseconds)
    pub telemetry_interval_ms: u32,
    /// Per-sample echo timeout (microseconds)
    pub echo_timeout_us: u32,
    /// Ranging samples averaged per level measurement
    pub level_samples: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Tank
            tank_height_cm: 100.0,
            tank_area_cm2: 10_000.0,

            // Motor
            motor_start_below_percent: 30.0,
            motor_stop_above_percent: 90.0,
            manual_stop_percent: 95.0,

            // Auxiliary subsystems
            irrigation: AuxTiming {
                interval_ms: 86_400_000, // 1 day
                run_ms: 10_000,
            },
            solar_wash: AuxTiming {
                interval_ms: 864_000_000, // 10 days
                run_ms: 10_000,
            },
            ro: AuxTiming {
                interval_ms: 43_200_000, // 12 h
                run_ms: 10_000,
            },

            // Indicators
            thermal: ThermalPolicy::SplitBand {
                cold_below_c: 40.0,
                hot_at_or_above_c: 60.0,
            },
            tank_leds: TierPolicy::Proportional { leds: 8 },

            // Timing
            tick_interval_ms: 200,
            telemetry_interval_ms: 60_000,
            echo_timeout_us: 30_000,
            level_samples: 5,
        }
    }
}

impl SystemConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if !(self.tank_height_cm > 0.0) {
            return Err(Error::Config("tank_height_cm must be positive"));
        }
        if !(self.tank_area_cm2 > 0.0) {
            return Err(Error::Config("tank_area_cm2 must be positive"));
        }
        if !(self.motor_start_below_percent < self.motor_stop_above_percent) {
            return Err(Error::Config("motor start threshold must be below stop threshold"));
        }
        if !(self.motor_stop_above_percent <= 100.0 && self.motor_start_below_percent >= 0.0) {
            return Err(Error::Config("motor thresholds must lie within 0-100"));
        }
        if !(self.manual_stop_percent > 0.0 && self.manual_stop_percent <= 100.0) {
            return Err(Error::Config("manual_stop_percent must lie within (0, 100]"));
        }
        for timing in [self.irrigation, self.solar_wash, self.ro] {
            if timing.run_ms == 0 {
                return Err(Error::Config("auxiliary run_ms must be non-zero"));
            }
        }
        if self.thermal.cold_below_c() > self.thermal.hot_at_or_above_c() {
            return Err(Error::Config("cold threshold must not exceed hot threshold"));
        }
        self.validate_tiers()?;
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        if self.echo_timeout_us == 0 {
            return Err(Error::Config("echo_timeout_us must be non-zero"));
        }
        if self.level_samples == 0 || self.level_samples > MAX_LEVEL_SAMPLES {
            return Err(Error::Config("level_samples out of range"));
        }
        Ok(())
    }

    fn validate_tiers(&self) -> Result<()> {
        match &self.tank_leds {
            TierPolicy::Proportional { leds } => {
                if *leds == 0 || *leds > MAX_TANK_LEDS {
                    return Err(Error::Config("tank LED count out of range"));
                }
            }
            TierPolicy::ThreeTier => {}
            TierPolicy::Table { steps, full } => {
                if *full > MAX_TANK_LEDS || steps.iter().any(|s| s.lit > MAX_TANK_LEDS) {
                    return Err(Error::Config("tier table lights too many LEDs"));
                }
                if steps
                    .windows(2)
                    .any(|w| !(w[0].below_percent < w[1].below_percent))
                {
                    return Err(Error::Config("tier thresholds must be strictly ascending"));
                }
            }
        }
        Ok(())
    }

    /// Timing for the named subsystem.
    pub fn aux_timing(&self, kind: crate::control::auxiliary::AuxKind) -> AuxTiming {
        use crate::control::auxiliary::AuxKind;
        match kind {
            AuxKind::Irrigation => self.irrigation,
            AuxKind::SolarWash => self.solar_wash,
            AuxKind::ReverseOsmosis => self.ro,
        }
    }
}
