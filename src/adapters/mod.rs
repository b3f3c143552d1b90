//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements                     | Connects to             |
//! |---------------|--------------------------------|-------------------------|
//! | `hardware`    | PulseTimer, TemperatureProbe,  | Relay, LEDs, HC-SR04,   |
//! |               | HardwareOutput                 | DS18B20                 |
//! | `log_sink`    | EventSink                      | Serial log output       |
//! | `time`        | Clock                          | ESP32 system timer      |
//! | `wifi`        | (bring-up)                     | ESP-IDF WiFi STA        |
//! | `http_server` | (transport)                    | ESP-IDF httpd           |

pub mod hardware;
pub mod http_server;
pub mod log_sink;
pub mod time;
pub mod wifi;
