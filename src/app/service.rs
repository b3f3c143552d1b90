//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the [`ControllerState`] aggregate and every control
//! component. It exposes a clean, hardware-agnostic API. All I/O flows
//! through port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!   PulseTimer ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!  TempProbe   ──▶ │          AppService           │
//! HardwareOutput ◀─│ level · volume · motor · aux  │
//!                  └──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::api::status::Snapshot;
use crate::config::SystemConfig;
use crate::control::ControllerState;
use crate::control::auxiliary::AuxKind;
use crate::control::motor::MotorController;
use crate::control::tank_leds::TankLevelIndicator;
use crate::control::thermal::ThermalController;
use crate::control::volume::VolumeAccumulator;
use crate::error::ControlError;
use crate::sensors::level::{LevelReading, LevelSensor};

use super::commands::{AppCommand, CommandOutcome};
use super::events::AppEvent;
use super::ports::{EventSink, HardwareOutput, Indicator, PulseTimer, TemperatureProbe};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    state: ControllerState,
    level: LevelSensor,
    motor: MotorController,
    thermal: ThermalController,
    tank_leds: TankLevelIndicator,
    last_reading: Option<LevelReading>,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Outputs are untouched until [`start`](Self::start).
    pub fn new(config: SystemConfig) -> Self {
        Self {
            state: ControllerState::new(&config),
            level: LevelSensor::new(&config),
            motor: MotorController::new(&config),
            thermal: ThermalController::new(config.thermal),
            tank_leds: TankLevelIndicator::new(&config.tank_leds),
            last_reading: None,
            tick_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to its idle level and announce the start.
    pub fn start(&mut self, hw: &mut impl HardwareOutput, sink: &mut impl EventSink) {
        hw.set_relay(false);
        for indicator in [
            Indicator::Motor,
            Indicator::Irrigation,
            Indicator::SolarWash,
            Indicator::ReverseOsmosis,
            Indicator::Cold,
            Indicator::Hot,
        ] {
            hw.set_indicator(indicator, false);
        }
        for i in 0..self.config.tank_leds.positions() {
            hw.set_indicator(Indicator::TankLevel(i), false);
        }
        sink.emit(&AppEvent::Started);
        info!(
            "AppService started (tank {} cm x {} cm\u{00b2})",
            self.config.tank_height_cm, self.config.tank_area_cm2
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// Order: level → volume → motor → thermal → tank LEDs → aux. The
    /// `hw` parameter satisfies every port at once, which avoids a double
    /// mutable borrow while keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl PulseTimer + TemperatureProbe + HardwareOutput),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Level
        let reading = self.level.measure(hw);
        let percent = reading.percent;
        self.state.tank.percent = percent;
        self.last_reading = Some(reading);

        // 2. Volume, gated on the motor state from before this tick
        let was_running = self.state.motor.running;
        VolumeAccumulator::accumulate(&mut self.state.tank, reading.height_cm, was_running);

        // 3. Motor
        if let Some(transition) = self.motor.tick(&mut self.state.motor, percent, hw) {
            sink.emit(&AppEvent::MotorChanged {
                transition,
                percent,
            });
        }

        // 4. Thermal
        let prev_fault = self.state.thermal.fault;
        let temperature = hw.read_celsius(now_ms);
        self.thermal.update(&mut self.state.thermal, temperature, hw);
        match (prev_fault, self.state.thermal.fault) {
            (None, Some(e)) => sink.emit(&AppEvent::ProbeFault(e)),
            (Some(_), None) => sink.emit(&AppEvent::ProbeRecovered),
            _ => {}
        }

        // 5. Tank LEDs
        self.state.tank_leds_lit = self.tank_leds.update(percent, hw);

        // 6. Aux run windows
        for kind in self.state.aux.tick(now_ms, hw) {
            sink.emit(&AppEvent::AuxFinished(kind));
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a client command. This is the only way client input
    /// reaches the controller.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u32,
        hw: &mut impl HardwareOutput,
        sink: &mut impl EventSink,
    ) -> Result<CommandOutcome, ControlError> {
        match cmd {
            AppCommand::ToggleMotor => {
                let running = self.toggle_motor(hw, sink)?;
                Ok(CommandOutcome::Motor { running })
            }
            AppCommand::TriggerAux(kind) => {
                self.trigger(kind, now_ms, hw, sink);
                Ok(CommandOutcome::AuxTriggered(kind))
            }
        }
    }

    /// Returns the motor state after the toggle.
    fn toggle_motor(
        &mut self,
        hw: &mut impl HardwareOutput,
        sink: &mut impl EventSink,
    ) -> Result<bool, ControlError> {
        let percent = self.state.tank.percent;
        match self.motor.toggle(&mut self.state.motor, percent, hw) {
            Ok(transition) => {
                info!("Motor: {:?} by client at {:.1}%", transition, percent);
                sink.emit(&AppEvent::MotorChanged {
                    transition,
                    percent,
                });
                Ok(self.state.motor.running)
            }
            Err(e) => {
                warn!("Motor: start refused at {:.1}%", percent);
                sink.emit(&AppEvent::TankFullRejected { percent });
                Err(e)
            }
        }
    }

    fn trigger(
        &mut self,
        kind: AuxKind,
        now_ms: u32,
        hw: &mut impl HardwareOutput,
        sink: &mut impl EventSink,
    ) {
        self.state.aux.trigger(kind, now_ms, hw);
        sink.emit(&AppEvent::AuxStarted(kind));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Fresh status projection at `now_ms`. Never cached.
    pub fn snapshot(&self, now_ms: u32) -> Snapshot {
        Snapshot::capture(&self.state, now_ms)
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Most recent level measurement, if a tick has run.
    pub fn last_reading(&self) -> Option<&LevelReading> {
        self.last_reading.as_ref()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
