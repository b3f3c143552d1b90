//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (HTTP routes,
//! tests) that the [`AppService`](super::service::AppService) interprets
//! and acts upon.

use crate::control::auxiliary::AuxKind;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Flip the pump between off and a manual run.
    ToggleMotor,

    /// Start (or restart) an auxiliary run window.
    TriggerAux(AuxKind),
}

/// What a successfully applied command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Motor state after a toggle.
    Motor { running: bool },
    AuxTriggered(AuxKind),
}
