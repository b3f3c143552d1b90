//! Tank level LED bar.
//!
//! Every policy compiles down to an ordered `(below_percent, lit)` table
//! that is evaluated top-down: the first step whose threshold exceeds the
//! level decides the count, otherwise the table's `full` count applies.

use heapless::Vec;

use crate::app::ports::{HardwareOutput, Indicator};
use crate::config::{MAX_TIER_STEPS, TierPolicy, TierStep};

#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    steps: Vec<TierStep, MAX_TIER_STEPS>,
    full: u8,
}

impl TierTable {
    pub fn from_policy(policy: &TierPolicy) -> Self {
        match policy {
            TierPolicy::Proportional { leds } => Self::proportional(*leds),
            TierPolicy::ThreeTier => Self::three_tier(),
            TierPolicy::Table { steps, full } => Self {
                steps: steps.clone(),
                full: *full,
            },
        }
    }

    /// Integer linear map: `lit = trunc(percent) * leds / 100`.
    ///
    /// Step `k` ends where that product reaches `k + 1`, i.e. at
    /// `ceil(100 * (k + 1) / leds)`.
    pub fn proportional(leds: u8) -> Self {
        let leds = leds.min(MAX_TIER_STEPS as u8);
        let n = u32::from(leds.max(1));
        let mut steps = Vec::new();
        for k in 0..u32::from(leds) {
            let below = (100 * (k + 1)).div_ceil(n);
            let _ = steps.push(TierStep {
                below_percent: below as f32,
                lit: k as u8,
            });
        }
        Self { steps, full: leds }
    }

    pub fn three_tier() -> Self {
        let mut steps = Vec::new();
        let _ = steps.push(TierStep {
            below_percent: 30.0,
            lit: 1,
        });
        let _ = steps.push(TierStep {
            below_percent: 70.0,
            lit: 2,
        });
        Self { steps, full: 3 }
    }

    pub fn lit_for(&self, percent: f32) -> u8 {
        self.steps
            .iter()
            .find(|s| percent < s.below_percent)
            .map_or(self.full, |s| s.lit)
    }
}

pub struct TankLevelIndicator {
    table: TierTable,
    positions: u8,
}

impl TankLevelIndicator {
    pub fn new(policy: &TierPolicy) -> Self {
        Self {
            table: TierTable::from_policy(policy),
            positions: policy.positions(),
        }
    }

    /// Light the bar for `percent`; returns the number of lit positions.
    pub fn update(&self, percent: f32, out: &mut impl HardwareOutput) -> u8 {
        let lit = self.table.lit_for(percent);
        for i in 0..self.positions {
            out.set_indicator(Indicator::TankLevel(i), i < lit);
        }
        lit
    }
}
