// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workload specifications: identity plus the parameters a workload must
//! be run under.

use crate::workload::Workload;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

crate::define_id! {
    /// Unique identifier for a workload spec within one agenda.
    pub struct SpecId;
}

/// A loosely-typed parameter bag (runtime/boot/flash parameters), matching
/// the original's free-form dict-of-dicts agenda format.
pub type ParameterMap = Map<String, Value>;

/// Identifies the workload to run and the parameters it runs under.
///
/// `enabled` is interior-mutable (an `AtomicBool`) because specs are
/// shared via `Arc` between the scheduler's job queue and the Runner: the
/// Runner is the sole mutator, flipping it to `false` to skip remaining
/// iterations after a fatal setup failure, but any job referencing the
/// spec needs to observe the flag.
pub struct WorkloadSpec {
    pub id: SpecId,
    pub label: String,
    pub section_id: Option<String>,
    pub number_of_iterations: u32,
    enabled: AtomicBool,
    pub workload: Arc<dyn Workload>,
    pub runtime_parameters: ParameterMap,
    pub boot_parameters: ParameterMap,
    pub flash: Option<ParameterMap>,
    pub instrumentation: HashSet<String>,
}

impl WorkloadSpec {
    pub fn new(
        id: impl Into<SpecId>,
        label: impl Into<String>,
        workload: Arc<dyn Workload>,
        number_of_iterations: u32,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            section_id: None,
            number_of_iterations,
            enabled: AtomicBool::new(true),
            workload,
            runtime_parameters: ParameterMap::new(),
            boot_parameters: ParameterMap::new(),
            flash: None,
            instrumentation: HashSet::new(),
        }
    }

    pub fn with_section(mut self, section_id: impl Into<String>) -> Self {
        self.section_id = Some(section_id.into());
        self
    }

    pub fn with_runtime_parameters(mut self, params: ParameterMap) -> Self {
        self.runtime_parameters = params;
        self
    }

    pub fn with_boot_parameters(mut self, params: ParameterMap) -> Self {
        self.boot_parameters = params;
        self
    }

    pub fn with_flash(mut self, params: ParameterMap) -> Self {
        self.flash = Some(params);
        self
    }

    pub fn with_instrumentation(mut self, names: HashSet<String>) -> Self {
        self.instrumentation = names;
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disable the spec, skipping all remaining iterations for the rest
    /// of the run. The only caller is the Runner, on a fatal setup
    /// failure or a parameter-setup failure.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }
}

impl fmt::Display for WorkloadSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
