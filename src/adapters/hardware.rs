//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the relay, the indicator bank, the ranger and the temperature
//! probe, exposing them through [`PulseTimer`], [`TemperatureProbe`] and
//! [`HardwareOutput`]. This is the only module in the system that touches
//! actual hardware. On non-espidf targets, the underlying drivers use
//! cfg-gated simulation stubs.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{Echo, HardwareOutput, Indicator, PulseTimer, TemperatureProbe};
use crate::drivers::indicators::IndicatorBank;
use crate::drivers::relay::MotorRelay;
use crate::error::SensorError;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: OutputPin, R, T> {
    relay: MotorRelay<P>,
    indicators: IndicatorBank<P>,
    ranger: R,
    probe: T,
}

impl<P, R, T> HardwareAdapter<P, R, T>
where
    P: OutputPin,
    R: PulseTimer,
    T: TemperatureProbe,
{
    pub fn new(relay: MotorRelay<P>, indicators: IndicatorBank<P>, ranger: R, probe: T) -> Self {
        Self {
            relay,
            indicators,
            ranger,
            probe,
        }
    }

    pub fn relay_energised(&self) -> bool {
        self.relay.is_energised()
    }
}

// ── Sensor ports ──────────────────────────────────────────────

impl<P: OutputPin, R: PulseTimer, T> PulseTimer for HardwareAdapter<P, R, T> {
    fn ping(&mut self, timeout_us: u32) -> Echo {
        self.ranger.ping(timeout_us)
    }
}

impl<P: OutputPin, R, T: TemperatureProbe> TemperatureProbe for HardwareAdapter<P, R, T> {
    fn read_celsius(&mut self, now_ms: u32) -> Result<f32, SensorError> {
        self.probe.read_celsius(now_ms)
    }
}

// ── Output port ───────────────────────────────────────────────

impl<P: OutputPin, R, T> HardwareOutput for HardwareAdapter<P, R, T> {
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.set(indicator, on);
    }
}
