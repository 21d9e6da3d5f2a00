// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds shared across the execution core.

use thiserror::Error;

/// Misconfiguration. Fatal at startup; fatal inside a job only for
/// impossible reboot/flash requests.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unexpected execution order: {0}")]
    UnknownExecutionOrder(String),
    #[error("unexpected reboot policy: {0}")]
    UnknownRebootPolicy(String),
    #[error("cannot flash device: reboot_policy does not permit rebooting")]
    FlashNotPermitted,
    #[error("device does not support flashing")]
    DeviceCannotFlash,
    #[error("device not configured for this run")]
    NoDevice,
}

/// Recoverable device-side failure.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device operation timed out: {0}")]
    Timeout(String),
    #[error("device error: {0}")]
    Other(String),
    #[error("could not reboot device; max reboot attempts exceeded")]
    RebootExhausted,
    #[error("cannot connect to device for initial reboot; device does not support hard reset")]
    CannotRecoverInitialBoot,
}

/// The device failed to respond even after an error; recovery escalates
/// to the hard-reset path.
#[derive(Debug, Error)]
#[error("device is not responding: {0}")]
pub struct DeviceNotRespondingError(pub String);

/// A workload-level timeout, distinct from `DeviceError::Timeout` in that
/// it is raised by workload code rather than the device layer.
#[derive(Debug, Error)]
#[error("workload timed out: {0}")]
pub struct TimeoutError(pub String);

/// Generic workload/harness error, the fallback bucket for anything that
/// isn't a more specific kind above.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct WaError(pub String);

impl WaError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Raised when instrumentation reports a failure during initialization;
/// always fatal to run startup.
#[derive(Debug, Error)]
#[error("detected failure(s) during instrumentation initialization")]
pub struct InstrumentError;

/// The union of error kinds an iteration-level error handler can see.
/// `DeviceNotResponding` and `Interrupted` are the only variants that are
/// allowed to escape a `handle_errors` scope.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error(transparent)]
    DeviceNotResponding(#[from] DeviceNotRespondingError),
    #[error(transparent)]
    Timeout(#[from] TimeoutError),
    #[error(transparent)]
    Wa(#[from] WaError),
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    #[error("run interrupted by user")]
    Interrupted,
}

impl RunnerError {
    /// Whether this error must propagate out of a `handle_errors` scope
    /// rather than being absorbed into an iteration status.
    pub fn must_propagate(&self) -> bool {
        matches!(
            self,
            RunnerError::DeviceNotResponding(_) | RunnerError::Interrupted
        )
    }
}
