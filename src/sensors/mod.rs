//! Sensor drivers: tank level ranging and water temperature.

pub mod level;
pub mod temperature;
pub mod ultrasonic;
