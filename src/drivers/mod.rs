//! Actuator drivers, hardware initialisation, and bus primitives.

pub mod hw_init;
pub mod indicators;
pub mod one_wire;
pub mod relay;
