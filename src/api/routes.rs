//! Request routing.
//!
//! ```text
//!   GET /             dashboard document
//!   GET /status       JSON snapshot
//!   GET /motor        toggle pump          200 "Motor ON|OFF" · 403
//!   GET /irr          trigger irrigation   200 "OK"
//!   GET /solar        trigger solar wash   200 "OK"
//!   GET /ro           trigger RO flush     200 "OK"
//!   GET /aux/<name>   trigger by name      200 "OK" · 400
//!   *                 404
//! ```

use log::debug;

use super::HttpResponse;
use super::control::command_response;
use crate::app::commands::AppCommand;
use crate::app::ports::{EventSink, HardwareOutput};
use crate::app::service::AppService;
use crate::control::auxiliary::AuxKind;

/// A parsed request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Dashboard,
    Status,
    ToggleMotor,
    /// Subsystem by client name; validated when the command runs.
    TriggerAux(&'a str),
    NotFound,
}

impl<'a> Route<'a> {
    /// Query strings are ignored.
    pub fn parse(path: &'a str) -> Self {
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        match path {
            "/" => Self::Dashboard,
            "/status" => Self::Status,
            "/motor" => Self::ToggleMotor,
            "/irr" => Self::TriggerAux(AuxKind::Irrigation.name()),
            "/solar" => Self::TriggerAux(AuxKind::SolarWash.name()),
            "/ro" => Self::TriggerAux(AuxKind::ReverseOsmosis.name()),
            other => match other.strip_prefix("/aux/") {
                Some(name) if !name.is_empty() => Self::TriggerAux(name),
                _ => Self::NotFound,
            },
        }
    }
}

pub struct Router {
    dashboard: &'static str,
}

impl Router {
    pub fn new(dashboard: &'static str) -> Self {
        Self { dashboard }
    }

    /// Answer one request against the live controller.
    pub fn handle(
        &self,
        path: &str,
        now_ms: u32,
        app: &mut AppService,
        hw: &mut impl HardwareOutput,
        sink: &mut impl EventSink,
    ) -> HttpResponse {
        let route = Route::parse(path);
        debug!("HTTP: {} -> {:?}", path, route);
        match route {
            Route::Dashboard => HttpResponse::html(self.dashboard),
            Route::Status => HttpResponse::json(app.snapshot(now_ms).to_json()),
            Route::ToggleMotor => {
                command_response(app.handle_command(AppCommand::ToggleMotor, now_ms, hw, sink))
            }
            Route::TriggerAux(name) => {
                let result = AuxKind::from_name(name).and_then(|kind| {
                    app.handle_command(AppCommand::TriggerAux(kind), now_ms, hw, sink)
                });
                command_response(result)
            }
            Route::NotFound => HttpResponse::not_found(),
        }
    }
}
