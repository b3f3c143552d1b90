//! Heater water-temperature indicators.

use log::{info, warn};

use crate::app::ports::{HardwareOutput, Indicator};
use crate::config::ThermalPolicy;
use crate::error::SensorError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThermalState {
    /// Last good reading (°C).
    pub temperature_c: f32,
    pub cold: bool,
    pub hot: bool,
    /// Active probe fault, if the latest read failed.
    pub fault: Option<SensorError>,
}

pub struct ThermalController {
    policy: ThermalPolicy,
}

impl ThermalController {
    pub fn new(policy: ThermalPolicy) -> Self {
        Self { policy }
    }

    /// Fold one probe read into `state` and drive the cold/hot LEDs.
    ///
    /// A failed read keeps the previous temperature; the indicators are
    /// re-derived from it either way. A conversion still in flight is not
    /// a fault.
    pub fn update(
        &self,
        state: &mut ThermalState,
        reading: Result<f32, SensorError>,
        out: &mut impl HardwareOutput,
    ) {
        match reading {
            Ok(celsius) => {
                if state.fault.take().is_some() {
                    info!("Thermal: probe recovered ({:.1}\u{00b0}C)", celsius);
                }
                state.temperature_c = celsius;
            }
            Err(SensorError::ConversionPending) => {}
            Err(e) => {
                if state.fault != Some(e) {
                    warn!("Thermal: {}, holding {:.1}\u{00b0}C", e, state.temperature_c);
                }
                state.fault = Some(e);
            }
        }

        state.cold = state.temperature_c < self.policy.cold_below_c();
        state.hot = state.temperature_c >= self.policy.hot_at_or_above_c();
        out.set_indicator(Indicator::Cold, state.cold);
        out.set_indicator(Indicator::Hot, state.hot);
    }
}
