//! One-shot hardware peripheral initialization and raw timing helpers.
//!
//! Configures the ultrasonic trigger/echo pins and the 1-Wire data line
//! using raw ESP-IDF sys calls, and provides the microsecond primitives the
//! ranger and 1-Wire drivers are built on. Relay and LED outputs are not
//! handled here; they go through `embedded-hal` pin drivers.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        configure(
            pins::ULTRASONIC_TRIG_GPIO,
            gpio_mode_t_GPIO_MODE_OUTPUT,
            gpio_pullup_t_GPIO_PULLUP_DISABLE,
        )?;
        gpio_set_level(pins::ULTRASONIC_TRIG_GPIO, 0);

        configure(
            pins::ULTRASONIC_ECHO_GPIO,
            gpio_mode_t_GPIO_MODE_INPUT,
            gpio_pullup_t_GPIO_PULLUP_DISABLE,
        )?;

        // Open-drain with the internal pull-up as a backstop for the
        // external resistor.
        configure(
            pins::ONE_WIRE_GPIO,
            gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
            gpio_pullup_t_GPIO_PULLUP_ENABLE,
        )?;
        gpio_set_level(pins::ONE_WIRE_GPIO, 1);
    }
    info!("hw_init: ranger and 1-Wire pins configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn configure(pin: i32, mode: gpio_mode_t, pull_up: gpio_pullup_t) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode,
        pull_up_en: pull_up,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

// ── GPIO ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Host builds see an idle bus: every line floats high.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: register write to a pin configured in init_peripherals().
    // Control-loop only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Timing ────────────────────────────────────────────────────

/// Microseconds since boot (64-bit, does not wrap in practice).
#[cfg(target_os = "espidf")]
pub fn micros() -> u64 {
    // SAFETY: esp_timer_get_time reads the RTC-backed system timer.
    (unsafe { esp_timer_get_time() }).max(0) as u64
}

#[cfg(not(target_os = "espidf"))]
pub fn micros() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static BOOT: OnceLock<Instant> = OnceLock::new();
    BOOT.get_or_init(Instant::now).elapsed().as_micros() as u64
}

/// Busy-wait for `us` microseconds.
#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: ROM busy-wait; no shared state.
    unsafe { esp_rom_delay_us(us) };
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}

/// Width of the next HIGH pulse on `pin`, in microseconds.
///
/// A pulse already in progress is skipped. The wait for it to end, the
/// wait for the rising edge and the pulse itself all share one
/// `timeout_us` deadline. Returns `None` when the deadline passes.
pub fn pulse_in_high(pin: i32, timeout_us: u32) -> Option<u32> {
    measure_high_pulse(|| gpio_read(pin), micros, timeout_us)
}

fn measure_high_pulse(
    mut level: impl FnMut() -> bool,
    mut now_us: impl FnMut() -> u64,
    timeout_us: u32,
) -> Option<u32> {
    let start = now_us();
    let deadline = start + u64::from(timeout_us);
    let mut wait_while = |high: bool| -> Option<u64> {
        while level() == high {
            if now_us() > deadline {
                return None;
            }
        }
        Some(now_us())
    };

    // Tail of a previous echo.
    wait_while(true)?;
    let rise = wait_while(false)?;
    let fall = wait_while(true)?;
    Some((fall - rise) as u32)
}

/// Run `f` with interrupts masked on this core. 1-Wire slots are only a
/// few microseconds wide.
#[cfg(target_os = "espidf")]
pub fn critical<R>(f: impl FnOnce() -> R) -> R {
    esp_idf_svc::hal::interrupt::free(f)
}

#[cfg(not(target_os = "espidf"))]
pub fn critical<R>(f: impl FnOnce() -> R) -> R {
    f()
}
