//! SmartWater Firmware: Main Entry Point
//!
//! Hexagonal architecture with one cooperative control thread.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink   Esp32Clock   httpd      │
//! │  (Pulse+Probe+Output)   (EventSink)    (Clock)      (channels) │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Level · Volume · Motor · Thermal · LEDs · Aux         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  ControlScheduler (tick cadence · request service)             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{info, warn};

use smartwater::adapters::hardware::HardwareAdapter;
use smartwater::adapters::log_sink::LogEventSink;
use smartwater::adapters::time::Esp32Clock;
use smartwater::adapters::wifi::{WifiCredentials, connect_station};
use smartwater::adapters::http_server;
use smartwater::api::channels::ChannelRequestPort;
use smartwater::api::routes::Router;
use smartwater::app::service::AppService;
use smartwater::config::SystemConfig;
use smartwater::drivers::hw_init;
use smartwater::drivers::indicators::{IndicatorBank, IndicatorPins};
use smartwater::drivers::one_wire::GpioOneWire;
use smartwater::drivers::relay::MotorRelay;
use smartwater::pins;
use smartwater::scheduler::ControlScheduler;
use smartwater::sensors::temperature::Ds18b20;
use smartwater::sensors::ultrasonic::UltrasonicRanger;

const DASHBOARD_HTML: &str = include_str!("../assets/dashboard.html");

/// Idle time between scheduler polls.
const POLL_SLEEP: Duration = Duration::from_millis(5);

type Pin = PinDriver<'static, AnyOutputPin, Output>;

/// Output driver for a GPIO number from [`pins`].
fn output(gpio: i32) -> Result<Pin> {
    // SAFETY: each number in `pins` is claimed exactly once, here, and the
    // typed GPIO fields of `Peripherals` are never used.
    Ok(unsafe { PinDriver::output(AnyOutputPin::new(gpio)) }?)
}

/// Built-in defaults, optionally replaced by a JSON document supplied at
/// build time.
fn load_config() -> SystemConfig {
    let Some(json) = option_env!("SMARTWATER_CONFIG_JSON") else {
        return SystemConfig::default();
    };
    match SystemConfig::from_json(json) {
        Ok(config) => {
            info!("Config: loaded from build environment");
            config
        }
        Err(e) => {
            warn!("Config: {} - using defaults", e);
            SystemConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartWater v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    hw_init::init_peripherals()?;

    // ── 2. Config ─────────────────────────────────────────────
    let config = load_config();

    // ── 3. Outputs ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    let relay = MotorRelay::new(output(pins::MOTOR_RELAY_GPIO)?);
    let mut tank = heapless::Vec::new();
    for gpio in pins::TANK_LED_GPIOS {
        if tank.push(output(gpio)?).is_err() {
            warn!("Indicators: more tank LEDs than supported, extra ignored");
        }
    }
    let indicators = IndicatorBank::new(IndicatorPins {
        motor: output(pins::MOTOR_LED_GPIO)?,
        irrigation: output(pins::IRRIGATION_LED_GPIO)?,
        solar_wash: output(pins::SOLAR_WASH_LED_GPIO)?,
        reverse_osmosis: output(pins::RO_LED_GPIO)?,
        cold: output(pins::COLD_LED_GPIO)?,
        hot: output(pins::HOT_LED_GPIO)?,
        tank,
    });

    // ── 4. Sensors ────────────────────────────────────────────
    let ranger = UltrasonicRanger::new(pins::ULTRASONIC_TRIG_GPIO, pins::ULTRASONIC_ECHO_GPIO);
    let probe = Ds18b20::new(GpioOneWire::new(pins::ONE_WIRE_GPIO));
    let mut hw = HardwareAdapter::new(relay, indicators, ranger, probe);

    // ── 5. Network ────────────────────────────────────────────
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;
    let creds = WifiCredentials::from_build_env()?;
    let _wifi = connect_station(peripherals.modem, sys_loop, nvs, &creds)?;
    let _server = http_server::start()?;

    // ── 6. Control loop ───────────────────────────────────────
    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(config);
    let mut scheduler = ControlScheduler::new(app.config());
    let router = Router::new(DASHBOARD_HTML);
    let mut requests = ChannelRequestPort;

    app.start(&mut hw, &mut sink);

    loop {
        scheduler.poll(&clock, &mut app, &mut hw, &router, &mut requests, &mut sink);
        std::thread::sleep(POLL_SLEEP);
    }
}
