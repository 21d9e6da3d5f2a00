// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wa-engine: the execution core. Wires the signal bus, scheduler
//! policies, reboot/interrupt handling and the job-loop Runner together
//! behind the [`Executor`] front door.

pub mod bus;
pub mod executor;
pub mod interrupt;
pub mod logging;
pub mod reboot;
pub mod runner;
pub mod scheduler;

pub use bus::{signal_wrap, HandlerId, SignalBus};
pub use executor::{Executor, ExecutorInputs};
pub use interrupt::Interrupt;
pub use logging::LogFlagLayer;
pub use reboot::{initial_boot, reboot_device, MAX_REBOOT_ATTEMPTS};
pub use runner::{Runner, RunnerState, SharedInstrumentHub};
pub use scheduler::{
    ByIterationScheduler, BySectionScheduler, BySpecScheduler, RandomScheduler, Scheduler,
};
