// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run and iteration outcomes.

use crate::artifact::Artifact;
use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
    pub lower_is_better: bool,
}

impl Metric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            units: None,
            lower_is_better: false,
        }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn lower_is_better(mut self, lower_is_better: bool) -> Self {
        self.lower_is_better = lower_is_better;
        self
    }
}

/// The outcome of one job attempt.
#[derive(Debug, Clone)]
pub struct IterationResult {
    pub status: Status,
    pub events: Vec<String>,
    pub metrics: Vec<Metric>,
    pub artifacts: Vec<Artifact>,
    pub iteration: Option<u32>,
    pub output_directory: Option<PathBuf>,
}

impl IterationResult {
    pub fn new() -> Self {
        Self {
            status: Status::Running,
            events: Vec::new(),
            metrics: Vec::new(),
            artifacts: Vec::new(),
            iteration: None,
            output_directory: None,
        }
    }

    pub fn add_event(&mut self, message: impl Into<String>) {
        self.events.push(message.into());
    }

    pub fn add_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }
}

impl Default for IterationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata about the run as a whole, independent of any one iteration.
#[derive(Debug, Clone)]
pub struct RunInfo {
    pub uuid: Uuid,
    pub start_time: Option<SystemTime>,
    pub end_time: Option<SystemTime>,
    pub duration: Option<Duration>,
    pub device_properties: Option<serde_json::Value>,
}

impl RunInfo {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            start_time: None,
            end_time: None,
            duration: None,
            device_properties: None,
        }
    }
}

impl Default for RunInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// The complete outcome of a run: every iteration's result plus
/// run-scoped metrics and artifacts that don't belong to any one
/// iteration (device properties snapshot, the run log itself).
#[derive(Debug, Clone)]
pub struct RunResult {
    pub run_info: RunInfo,
    pub iteration_results: Vec<IterationResult>,
    pub metrics: Vec<Metric>,
    pub artifacts: Vec<Artifact>,
    pub non_iteration_errors: bool,
}

impl RunResult {
    pub fn new(run_info: RunInfo) -> Self {
        Self {
            run_info,
            iteration_results: Vec::new(),
            metrics: Vec::new(),
            artifacts: Vec::new(),
            non_iteration_errors: false,
        }
    }

    pub fn add_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Count of iteration results per status, in `Status::CANONICAL_ORDER`.
    pub fn status_histogram(&self) -> Vec<(Status, usize)> {
        Status::CANONICAL_ORDER
            .iter()
            .map(|&status| {
                let count = self
                    .iteration_results
                    .iter()
                    .filter(|r| r.status == status)
                    .count();
                (status, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
