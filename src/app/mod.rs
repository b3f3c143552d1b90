//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control rules for the SmartWater controller:
//! level measurement, pump hysteresis, auxiliary run windows, heater
//! indicators and the tank LED bar. All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
