//! Timed auxiliary subsystems: irrigation, solar-panel wash and RO flush.
//!
//! Each subsystem runs for a fixed window after a trigger and is cleared
//! only by [`AuxScheduler::tick`]. The cooldown interval is reported to the
//! dashboard as "next eligible" but never blocks a trigger. All instants
//! are wrapping `u32` milliseconds.

use log::info;

use crate::app::ports::{HardwareOutput, Indicator, elapsed_ms};
use crate::config::{AuxTiming, SystemConfig};
use crate::error::ControlError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxKind {
    Irrigation,
    SolarWash,
    ReverseOsmosis,
}

impl AuxKind {
    pub const ALL: [AuxKind; 3] = [Self::Irrigation, Self::SolarWash, Self::ReverseOsmosis];

    /// Name used by clients.
    pub fn name(self) -> &'static str {
        match self {
            Self::Irrigation => "irrigation",
            Self::SolarWash => "solarWash",
            Self::ReverseOsmosis => "ro",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ControlError> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or(ControlError::UnknownSubsystem)
    }

    pub fn indicator(self) -> Indicator {
        match self {
            Self::Irrigation => Indicator::Irrigation,
            Self::SolarWash => Indicator::SolarWash,
            Self::ReverseOsmosis => Indicator::ReverseOsmosis,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Irrigation => 0,
            Self::SolarWash => 1,
            Self::ReverseOsmosis => 2,
        }
    }
}

/// Run/cooldown tracker for one subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxSubsystem {
    pub kind: AuxKind,
    pub running: bool,
    pub last_start_ms: u32,
    pub interval_ms: u32,
    pub run_ms: u32,
}

impl AuxSubsystem {
    pub fn new(kind: AuxKind, timing: AuxTiming) -> Self {
        Self {
            kind,
            running: false,
            last_start_ms: 0,
            interval_ms: timing.interval_ms,
            run_ms: timing.run_ms,
        }
    }

    /// Start (or restart) the run window at `now_ms`.
    pub fn trigger(&mut self, now_ms: u32, out: &mut impl HardwareOutput) {
        self.running = true;
        self.last_start_ms = now_ms;
        out.set_indicator(self.kind.indicator(), true);
    }

    /// Clear the run once its window has elapsed. Returns `true` on the
    /// tick that finishes the run.
    pub fn tick(&mut self, now_ms: u32, out: &mut impl HardwareOutput) -> bool {
        if self.running && elapsed_ms(now_ms, self.last_start_ms) >= self.run_ms {
            self.running = false;
            out.set_indicator(self.kind.indicator(), false);
            return true;
        }
        false
    }

    /// Whole seconds left in the current run; 0 when idle.
    pub fn remaining_run_secs(&self, now_ms: u32) -> u32 {
        if !self.running {
            return 0;
        }
        self.run_ms
            .saturating_sub(elapsed_ms(now_ms, self.last_start_ms))
            / 1000
    }

    /// Whole seconds until the cooldown display reaches zero; 0 while running.
    pub fn next_eligible_secs(&self, now_ms: u32) -> u32 {
        if self.running {
            return 0;
        }
        self.interval_ms
            .saturating_sub(elapsed_ms(now_ms, self.last_start_ms))
            / 1000
    }
}

/// The three subsystems, indexed by [`AuxKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxScheduler {
    subsystems: [AuxSubsystem; 3],
}

impl AuxScheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            subsystems: AuxKind::ALL.map(|k| AuxSubsystem::new(k, config.aux_timing(k))),
        }
    }

    pub fn get(&self, kind: AuxKind) -> &AuxSubsystem {
        &self.subsystems[kind.index()]
    }

    pub fn trigger(&mut self, kind: AuxKind, now_ms: u32, out: &mut impl HardwareOutput) {
        let sub = &mut self.subsystems[kind.index()];
        if sub.running {
            info!("Aux: '{}' restarted", kind.name());
        } else {
            info!("Aux: '{}' started ({} ms)", kind.name(), sub.run_ms);
        }
        sub.trigger(now_ms, out);
    }

    /// Advance every subsystem. Returns the kinds whose run ended this tick.
    pub fn tick(
        &mut self,
        now_ms: u32,
        out: &mut impl HardwareOutput,
    ) -> heapless::Vec<AuxKind, 3> {
        let mut finished = heapless::Vec::new();
        for sub in &mut self.subsystems {
            if sub.tick(now_ms, out) {
                info!("Aux: '{}' finished", sub.kind.name());
                // Capacity equals the subsystem count.
                let _ = finished.push(sub.kind);
            }
        }
        finished
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuxSubsystem> {
        self.subsystems.iter()
    }
}
