//! Bit-banged 1-Wire master on a single open-drain GPIO.
//!
//! Standard-speed slot timings (µs):
//!
//! ```text
//!   reset   : low 480, release, sample at +70, wait out 410
//!   write 1 : low 6, release 64
//!   write 0 : low 60, release 10
//!   read    : low 6, release, sample at +9, wait out 55
//! ```
//!
//! Each slot runs with interrupts masked; a slot disturbed anyway shows up
//! as a CRC failure one layer up.

use crate::drivers::hw_init;
use crate::sensors::temperature::OneWireBus;

pub struct GpioOneWire {
    pin: i32,
}

impl GpioOneWire {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }

    fn write_bit(&mut self, bit: bool) {
        let (low, high) = if bit { (6, 64) } else { (60, 10) };
        hw_init::critical(|| {
            hw_init::gpio_write(self.pin, false);
            hw_init::delay_us(low);
            hw_init::gpio_write(self.pin, true);
        });
        hw_init::delay_us(high);
    }

    fn read_bit(&mut self) -> bool {
        let bit = hw_init::critical(|| {
            hw_init::gpio_write(self.pin, false);
            hw_init::delay_us(6);
            hw_init::gpio_write(self.pin, true);
            hw_init::delay_us(9);
            hw_init::gpio_read(self.pin)
        });
        hw_init::delay_us(55);
        bit
    }
}

impl OneWireBus for GpioOneWire {
    fn reset(&mut self) -> bool {
        hw_init::gpio_write(self.pin, false);
        hw_init::delay_us(480);
        let present = hw_init::critical(|| {
            hw_init::gpio_write(self.pin, true);
            hw_init::delay_us(70);
            // A device answers by holding the line low.
            !hw_init::gpio_read(self.pin)
        });
        hw_init::delay_us(410);
        present
    }

    fn write_byte(&mut self, byte: u8) {
        for i in 0..8 {
            self.write_bit(byte & (1 << i) != 0);
        }
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = 0u8;
        for i in 0..8 {
            if self.read_bit() {
                byte |= 1 << i;
            }
        }
        byte
    }
}
