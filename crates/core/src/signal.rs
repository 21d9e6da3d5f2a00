// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal vocabulary dispatched on the signal bus (the bus itself, and
//! the `signal_wrap`/`handle_errors` helpers that use this vocabulary,
//! live in the engine crate — this module only names what can be sent).

use std::fmt;

/// The sixteen named phases of a run, each exposed as a `Before` /
/// `Successful` / `After` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalName {
    RunInit,
    RunStart,
    RunEnd,
    RunFin,
    WorkloadSpecStart,
    WorkloadSpecEnd,
    IterationStart,
    IterationEnd,
    WorkloadSetup,
    WorkloadExecution,
    WorkloadTeardown,
    WorkloadResultUpdate,
    OverallResultsProcessing,
    Flashing,
    Boot,
    InitialBoot,
}

impl fmt::Display for SignalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The point in a wrapped phase a signal marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Before,
    /// Fired only if the wrapped body completed without error.
    Successful,
    /// Always fired, whether or not the body succeeded.
    After,
}

/// A single dispatchable event on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Phased(SignalName, Phase),
    /// Fired by the logging adapter whenever an `ERROR`-level event is
    /// logged, regardless of whether it originates from a `handle_errors`
    /// scope.
    ErrorLogged,
    /// Same, for `WARN`-level events.
    WarningLogged,
}

impl Signal {
    pub fn before(name: SignalName) -> Self {
        Signal::Phased(name, Phase::Before)
    }

    pub fn successful(name: SignalName) -> Self {
        Signal::Phased(name, Phase::Successful)
    }

    pub fn after(name: SignalName) -> Self {
        Signal::Phased(name, Phase::After)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Phased(name, Phase::Before) => write!(f, "before-{}", name),
            Signal::Phased(name, Phase::Successful) => write!(f, "successful-{}", name),
            Signal::Phased(name, Phase::After) => write!(f, "after-{}", name),
            Signal::ErrorLogged => write!(f, "error-logged"),
            Signal::WarningLogged => write!(f, "warning-logged"),
        }
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
