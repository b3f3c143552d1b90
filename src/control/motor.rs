//! Pump motor state machine.
//!
//! ```text
//!            percent < start_below              percent > stop_above
//!   Off ─────────────────────────▶ AutoOn ─────────────────────────▶ Off
//!    │                                                              ▲
//!    │ toggle (percent < manual_stop)                               │
//!    ▼                                                              │
//!  ManualOn ──── percent >= manual_stop, or toggle ─────────────────┘
//! ```
//!
//! In manual mode the automatic thresholds are not evaluated at all. The
//! band between the start and stop thresholds is a dead zone that keeps
//! the relay from chattering at the boundary.

use log::info;

use crate::app::ports::{HardwareOutput, Indicator};
use crate::config::SystemConfig;
use crate::error::ControlError;

/// Relay state plus the manual-override latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorState {
    pub running: bool,
    pub manual_override: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorMode {
    Off,
    AutoOn,
    ManualOn,
}

impl MotorState {
    pub fn mode(&self) -> MotorMode {
        match (self.running, self.manual_override) {
            (false, _) => MotorMode::Off,
            (true, false) => MotorMode::AutoOn,
            (true, true) => MotorMode::ManualOn,
        }
    }
}

/// Why the motor changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorTransition {
    /// Level fell below the start threshold.
    AutoStart,
    /// Level rose above the stop threshold.
    AutoStop,
    /// Manual run reached the manual-stop level; control returns to auto.
    ManualLimitStop,
    /// Client switched the motor on.
    ManualStart,
    /// Client switched the motor off.
    ManualStop,
}

pub struct MotorController {
    start_below_percent: f32,
    stop_above_percent: f32,
    manual_stop_percent: f32,
}

impl MotorController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            start_below_percent: config.motor_start_below_percent,
            stop_above_percent: config.motor_stop_above_percent,
            manual_stop_percent: config.manual_stop_percent,
        }
    }

    /// Evaluate the transition rules once. Returns the transition taken, if any.
    pub fn tick(
        &self,
        state: &mut MotorState,
        percent: f32,
        out: &mut impl HardwareOutput,
    ) -> Option<MotorTransition> {
        if state.manual_override {
            if state.running && percent >= self.manual_stop_percent {
                state.running = false;
                state.manual_override = false;
                drive(out, false);
                info!("Motor: manual run stopped at {:.1}%", percent);
                return Some(MotorTransition::ManualLimitStop);
            }
            return None;
        }

        if percent < self.start_below_percent && !state.running {
            state.running = true;
            drive(out, true);
            info!("Motor: auto start at {:.1}%", percent);
            return Some(MotorTransition::AutoStart);
        }
        if percent > self.stop_above_percent && state.running {
            state.running = false;
            drive(out, false);
            info!("Motor: auto stop at {:.1}%", percent);
            return Some(MotorTransition::AutoStop);
        }
        None
    }

    /// Client toggle. Starting is refused once the tank is at the manual-stop level.
    pub fn toggle(
        &self,
        state: &mut MotorState,
        percent: f32,
        out: &mut impl HardwareOutput,
    ) -> Result<MotorTransition, ControlError> {
        if !state.running && percent >= self.manual_stop_percent {
            return Err(ControlError::TankFull);
        }
        state.running = !state.running;
        state.manual_override = state.running;
        drive(out, state.running);
        Ok(if state.running {
            MotorTransition::ManualStart
        } else {
            MotorTransition::ManualStop
        })
    }
}

fn drive(out: &mut impl HardwareOutput, running: bool) {
    out.set_relay(running);
    out.set_indicator(Indicator::Motor, running);
}
