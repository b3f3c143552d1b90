//! HC-SR04 ultrasonic ranger.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: 10 µs trigger pulse, then times the echo pulse via hw_init.
//! On host/test: replays an echo width injected through a static atomic.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::app::ports::{Echo, PulseTimer};
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Injected echo width in µs; 0 simulates a missing echo.
static SIM_ECHO_US: AtomicU32 = AtomicU32::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_us(us: u32) {
    SIM_ECHO_US.store(us, Ordering::Relaxed);
}

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
pub struct UltrasonicRanger {
    trig_gpio: i32,
    echo_gpio: i32,
}

impl UltrasonicRanger {
    pub fn new(trig_gpio: i32, echo_gpio: i32) -> Self {
        Self {
            trig_gpio,
            echo_gpio,
        }
    }

    #[cfg(target_os = "espidf")]
    fn measure_echo(&mut self, timeout_us: u32) -> Option<u32> {
        hw_init::gpio_write(self.trig_gpio, false);
        hw_init::delay_us(2);
        hw_init::gpio_write(self.trig_gpio, true);
        hw_init::delay_us(10);
        hw_init::gpio_write(self.trig_gpio, false);
        hw_init::pulse_in_high(self.echo_gpio, timeout_us)
    }

    #[cfg(not(target_os = "espidf"))]
    fn measure_echo(&mut self, timeout_us: u32) -> Option<u32> {
        match SIM_ECHO_US.load(Ordering::Relaxed) {
            0 => None,
            us if us > timeout_us => None,
            us => Some(us),
        }
    }
}

impl PulseTimer for UltrasonicRanger {
    fn ping(&mut self, timeout_us: u32) -> Echo {
        self.measure_echo(timeout_us)
            .map_or(Echo::TimedOut, Echo::Received)
    }
}
