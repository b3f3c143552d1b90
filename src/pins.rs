//! GPIO pin assignments for the SmartWater controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs HIGH pulse starts a measurement.
pub const ULTRASONIC_TRIG_GPIO: i32 = 5;
/// Digital input: HIGH for the echo round-trip time.
pub const ULTRASONIC_ECHO_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Pump motor
// ---------------------------------------------------------------------------

/// Relay coil driver. Active LOW: the relay closes when the pin is driven low.
pub const MOTOR_RELAY_GPIO: i32 = 23;
/// Motor running LED (active HIGH).
pub const MOTOR_LED_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// Tank level bar (bottom first)
// ---------------------------------------------------------------------------

/// Eight-position level bar. Position 1 sits on GPIO 19; GPIO 16 is taken
/// by the solar-wash LED.
pub const TANK_LED_GPIOS: [i32; 8] = [14, 19, 25, 26, 27, 32, 33, 21];

// ---------------------------------------------------------------------------
// Auxiliary subsystem LEDs
// ---------------------------------------------------------------------------

pub const IRRIGATION_LED_GPIO: i32 = 13;
pub const SOLAR_WASH_LED_GPIO: i32 = 16;
pub const RO_LED_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Heater
// ---------------------------------------------------------------------------

pub const COLD_LED_GPIO: i32 = 12;
pub const HOT_LED_GPIO: i32 = 2;

/// DS18B20 data line (open-drain, external 4.7 kΩ pull-up).
pub const ONE_WIRE_GPIO: i32 = 4;
