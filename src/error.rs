//! Unified error types for the SmartWater firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform. All variants are `Copy` so they
//! travel through the controller and event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// A control command was rejected.
    Control(ControlError),
    /// Configuration is inconsistent.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Control(e) => write!(f, "control: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No presence pulse on the 1-Wire bus.
    ProbeDisconnected,
    /// Scratchpad CRC did not match.
    CrcMismatch,
    /// A temperature conversion is still in flight.
    ConversionPending,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProbeDisconnected => write!(f, "temperature probe disconnected"),
            Self::CrcMismatch => write!(f, "scratchpad CRC mismatch"),
            Self::ConversionPending => write!(f, "conversion pending"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Control errors
// ---------------------------------------------------------------------------

/// Rejections surfaced to the client that issued the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Motor start refused because the tank is at or above the manual-stop level.
    TankFull,
    /// The named auxiliary subsystem does not exist.
    UnknownSubsystem,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TankFull => write!(f, "Tank Full, cannot start motor"),
            Self::UnknownSubsystem => write!(f, "Unknown subsystem"),
        }
    }
}

impl From<ControlError> for Error {
    fn from(e: ControlError) -> Self {
        Self::Control(e)
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
