//! SmartWater firmware library.
//!
//! Exposes the pure-logic modules for integration testing and host-side
//! simulation. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod api;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod scheduler;

// Hardware-facing modules; the device implementations are cfg-gated
// inside, with simulation stubs on other targets.
pub mod adapters;
pub mod drivers;
pub mod sensors;
