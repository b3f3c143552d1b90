//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(s) => {
                info!(
                    "TELEM | level={:.1}% | month={:.1}L | T={:.1}\u{00b0}C | motor={} | \
                     irr={}s/{}s sol={}s/{}s ro={}s/{}s",
                    s.level,
                    s.month,
                    s.temp,
                    if s.motor { "ON" } else { "OFF" },
                    s.irr,
                    s.irr_next,
                    s.sol,
                    s.sol_next,
                    s.ro,
                    s.ro_next,
                );
            }
            AppEvent::MotorChanged {
                transition,
                percent,
            } => {
                info!("MOTOR | {:?} at {:.1}%", transition, percent);
            }
            AppEvent::TankFullRejected { percent } => {
                warn!("MOTOR | start rejected, tank at {:.1}%", percent);
            }
            AppEvent::AuxStarted(kind) => {
                info!("AUX | {} started", kind.name());
            }
            AppEvent::AuxFinished(kind) => {
                info!("AUX | {} finished", kind.name());
            }
            AppEvent::ProbeFault(e) => {
                warn!("PROBE | {}", e);
            }
            AppEvent::ProbeRecovered => {
                info!("PROBE | recovered");
            }
            AppEvent::Started => {
                info!("START | outputs idle");
            }
        }
    }
}
