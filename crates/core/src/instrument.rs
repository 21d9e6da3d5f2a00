// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Instrumentation: passive observers installed onto the signal bus.
//!
//! An `Instrument` itself does no work here — it is identified and
//! validated through this module, then does its actual observing by
//! registering handlers on the signal bus (see the `engine` crate). The
//! hub tracks which instruments are enabled and collects failure reports
//! so run startup can abort if any instrument failed to come up cleanly.

use crate::error::ConfigError;
use std::collections::HashSet;
use std::sync::Arc;

pub trait Instrument: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

struct Entry {
    instrument: Arc<dyn Instrument>,
    enabled: bool,
}

/// Tracks installed instruments, which of them are enabled, and whether
/// any of them reported a failure during initialization.
#[derive(Default)]
pub struct InstrumentHub {
    entries: Vec<Entry>,
    failures: Vec<String>,
}

impl InstrumentHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, instrument: Arc<dyn Instrument>) {
        self.entries.push(Entry {
            instrument,
            enabled: true,
        });
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for entry in &self.entries {
            entry.instrument.validate()?;
        }
        Ok(())
    }

    pub fn enable(&mut self, names: &HashSet<String>) {
        for entry in &mut self.entries {
            entry.enabled = names.contains(entry.instrument.name());
        }
    }

    pub fn enable_all(&mut self) {
        for entry in &mut self.entries {
            entry.enabled = true;
        }
    }

    pub fn disable_all(&mut self) {
        for entry in &mut self.entries {
            entry.enabled = false;
        }
    }

    pub fn enabled_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.instrument.name())
            .collect()
    }

    pub fn report_failure(&mut self, message: impl Into<String>) {
        self.failures.push(message.into());
    }

    pub fn check_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
#[path = "instrument_tests.rs"]
mod tests;
