// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation: the Runner checks this flag between device
//! and workload hook calls rather than racing a signal future against
//! each one, so a job in flight always finishes its current suspension
//! point before the interrupt takes effect — deterministic to test and
//! cheap to reason about, at the cost of not preempting mid-call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A flag shared between the Runner's job loop and whatever surfaces a
/// user interrupt (`tokio::signal::ctrl_c` in the CLI, a test harness
/// directly in unit tests).
#[derive(Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent; escalating a second interrupt during
    /// queue drain to an actual process exit is the caller's
    /// responsibility — this type only tracks the cooperative in-run flag.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "interrupt_tests.rs"]
mod tests;
