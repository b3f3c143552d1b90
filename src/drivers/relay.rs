//! Pump motor relay.
//!
//! The relay module's input is active LOW: driving the pin low closes the
//! contacts and runs the pump. This driver hides that inversion; callers
//! speak in terms of "energised".
//!
//! Generic over [`OutputPin`] so it runs against a fake pin on the host.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

pub struct MotorRelay<P: OutputPin> {
    pin: P,
    energised: bool,
}

impl<P: OutputPin> MotorRelay<P> {
    /// Takes the pin and immediately releases the relay.
    pub fn new(pin: P) -> Self {
        let mut relay = Self {
            pin,
            energised: true,
        };
        relay.set(false);
        relay
    }

    pub fn set(&mut self, energised: bool) {
        let level = if energised { PinState::Low } else { PinState::High };
        if self.pin.set_state(level).is_err() {
            warn!("Relay: GPIO write failed");
            return;
        }
        self.energised = energised;
    }

    pub fn is_energised(&self) -> bool {
        self.energised
    }
}
