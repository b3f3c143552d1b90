//! Discrete indicator LEDs (all active HIGH).

use embedded_hal::digital::{OutputPin, PinState};
use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::Indicator;
use crate::config::MAX_TANK_LEDS;

/// One pin per indicator, plus the tank bar bottom-first.
pub struct IndicatorPins<P> {
    pub motor: P,
    pub irrigation: P,
    pub solar_wash: P,
    pub reverse_osmosis: P,
    pub cold: P,
    pub hot: P,
    pub tank: Vec<P, { MAX_TANK_LEDS as usize }>,
}

pub struct IndicatorBank<P: OutputPin> {
    pins: IndicatorPins<P>,
}

impl<P: OutputPin> IndicatorBank<P> {
    pub fn new(pins: IndicatorPins<P>) -> Self {
        Self { pins }
    }

    /// Number of tank bar positions wired.
    pub fn tank_positions(&self) -> usize {
        self.pins.tank.len()
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        let pin = match indicator {
            Indicator::Motor => &mut self.pins.motor,
            Indicator::Irrigation => &mut self.pins.irrigation,
            Indicator::SolarWash => &mut self.pins.solar_wash,
            Indicator::ReverseOsmosis => &mut self.pins.reverse_osmosis,
            Indicator::Cold => &mut self.pins.cold,
            Indicator::Hot => &mut self.pins.hot,
            Indicator::TankLevel(i) => match self.pins.tank.get_mut(usize::from(i)) {
                Some(pin) => pin,
                None => {
                    debug!("Indicators: tank position {} not wired", i);
                    return;
                }
            },
        };
        if pin.set_state(PinState::from(on)).is_err() {
            warn!("Indicators: GPIO write failed for {:?}", indicator);
        }
    }
}
