//! Recording output used by the unit tests in this module tree.

use crate::app::ports::{HardwareOutput, Indicator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputCall {
    Relay(bool),
    Indicator(Indicator, bool),
}

#[derive(Default)]
pub(crate) struct RecordingOutput {
    pub calls: Vec<OutputCall>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to the relay, if any.
    pub fn relay(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::Relay(on) => Some(*on),
            OutputCall::Indicator(..) => None,
        })
    }

    /// Last value written to `indicator`, if any.
    pub fn indicator(&self, indicator: Indicator) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::Indicator(i, on) if *i == indicator => Some(*on),
            _ => None,
        })
    }
}

impl HardwareOutput for RecordingOutput {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(OutputCall::Relay(on));
    }

    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.calls.push(OutputCall::Indicator(indicator, on));
    }
}
