// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Iteration status values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a single iteration (job attempt).
///
/// `Running` doubles as the pre-start sentinel: a freshly constructed
/// `IterationResult` starts out `Running` and the Runner promotes it to
/// `Ok` once setup, execution, result-update and teardown have all
/// completed without demoting it to something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Running,
    Ok,
    Partial,
    Noncritical,
    Failed,
    Aborted,
    Skipped,
}

impl Status {
    /// Canonical order used when rendering the run summary's status
    /// histogram — matches the order workloads are expected to be
    /// reported in, not declaration order.
    pub const CANONICAL_ORDER: [Status; 7] = [
        Status::Ok,
        Status::Partial,
        Status::Noncritical,
        Status::Failed,
        Status::Aborted,
        Status::Skipped,
        Status::Running,
    ];

    /// Whether this status makes the iteration eligible for retry under
    /// a `retry_on_status` policy that names it.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Running => "running",
            Status::Ok => "OK",
            Status::Partial => "PARTIAL",
            Status::Noncritical => "NONCRITICAL",
            Status::Failed => "FAILED",
            Status::Aborted => "ABORTED",
            Status::Skipped => "SKIPPED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
