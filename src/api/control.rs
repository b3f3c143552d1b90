//! Control command results as responses.

use super::HttpResponse;
use crate::app::commands::CommandOutcome;
use crate::error::ControlError;

impl ControlError {
    /// HTTP status a client sees for this rejection.
    pub fn status(self) -> u16 {
        match self {
            Self::TankFull => 403,
            Self::UnknownSubsystem => 400,
        }
    }
}

impl From<ControlError> for HttpResponse {
    fn from(e: ControlError) -> Self {
        HttpResponse::text(e.status(), e.to_string())
    }
}

/// Response to a client command.
pub fn command_response(result: Result<CommandOutcome, ControlError>) -> HttpResponse {
    match result {
        Ok(CommandOutcome::Motor { running: true }) => HttpResponse::ok("Motor ON"),
        Ok(CommandOutcome::Motor { running: false }) => HttpResponse::ok("Motor OFF"),
        Ok(CommandOutcome::AuxTriggered(_)) => HttpResponse::ok("OK"),
        Err(e) => e.into(),
    }
}
