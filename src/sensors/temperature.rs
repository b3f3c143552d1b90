//! DS18B20 water-temperature probe on a 1-Wire bus.
//!
//! A 12-bit conversion takes up to 750 ms, far longer than a control tick,
//! so the driver never blocks on it:
//!
//! ```text
//!   read(now) ──▶ no conversion in flight ──▶ reset, SKIP ROM, CONVERT T
//!             └─▶ in flight, < 750 ms     ──▶ Pending
//!             └─▶ in flight, ≥ 750 ms     ──▶ read scratchpad, CRC, start next
//! ```
//!
//! Only a completed scratchpad read yields a temperature. Callers hold the
//! last value (and any fault) across the `Pending` reads in between.
//!
//! The bus itself sits behind [`OneWireBus`] so the protocol runs against a
//! scripted bus in tests.

use log::{debug, warn};

use crate::app::ports::{TemperatureProbe, elapsed_ms};
use crate::error::SensorError;

/// Worst-case 12-bit conversion time.
pub const CONVERSION_MS: u32 = 750;

const CMD_SKIP_ROM: u8 = 0xCC;
const CMD_CONVERT_T: u8 = 0x44;
const CMD_READ_SCRATCHPAD: u8 = 0xBE;

/// Byte-level 1-Wire master.
pub trait OneWireBus {
    /// Reset pulse. Returns `true` when a device answered with presence.
    fn reset(&mut self) -> bool;
    fn write_byte(&mut self, byte: u8);
    fn read_byte(&mut self) -> u8;
}

/// Dallas/Maxim CRC-8 (polynomial x⁸ + x⁵ + x⁴ + 1, reflected).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

/// Validate a 9-byte scratchpad and convert its raw reading to °C.
pub fn scratchpad_to_celsius(scratchpad: &[u8; 9]) -> Result<f32, SensorError> {
    if crc8(&scratchpad[..8]) != scratchpad[8] {
        return Err(SensorError::CrcMismatch);
    }
    let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
    Ok(f32::from(raw) / 16.0)
}

pub struct Ds18b20<B: OneWireBus> {
    bus: B,
    conversion_started_ms: Option<u32>,
}

impl<B: OneWireBus> Ds18b20<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            conversion_started_ms: None,
        }
    }

    fn start_conversion(&mut self, now_ms: u32) -> Result<(), SensorError> {
        if !self.bus.reset() {
            self.conversion_started_ms = None;
            return Err(SensorError::ProbeDisconnected);
        }
        self.bus.write_byte(CMD_SKIP_ROM);
        self.bus.write_byte(CMD_CONVERT_T);
        self.conversion_started_ms = Some(now_ms);
        Ok(())
    }

    fn read_scratchpad(&mut self) -> Result<f32, SensorError> {
        if !self.bus.reset() {
            return Err(SensorError::ProbeDisconnected);
        }
        self.bus.write_byte(CMD_SKIP_ROM);
        self.bus.write_byte(CMD_READ_SCRATCHPAD);
        let mut pad = [0u8; 9];
        for b in &mut pad {
            *b = self.bus.read_byte();
        }
        scratchpad_to_celsius(&pad)
    }
}

impl<B: OneWireBus> TemperatureProbe for Ds18b20<B> {
    fn read_celsius(&mut self, now_ms: u32) -> Result<f32, SensorError> {
        let Some(started) = self.conversion_started_ms else {
            self.start_conversion(now_ms)?;
            return Err(SensorError::ConversionPending);
        };
        if elapsed_ms(now_ms, started) < CONVERSION_MS {
            return Err(SensorError::ConversionPending);
        }

        self.conversion_started_ms = None;
        let celsius = self.read_scratchpad()?;
        debug!("DS18B20: {:.2}\u{00b0}C", celsius);
        // A failed restart is retried on the next read; this value stands.
        if let Err(e) = self.start_conversion(now_ms) {
            warn!("DS18B20: next conversion not started: {}", e);
        }
        Ok(celsius)
    }
}
