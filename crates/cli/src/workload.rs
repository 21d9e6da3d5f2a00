// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The only workload kind this binary ships: run an external command
//! and report its exit status and wall-clock time as the iteration's
//! outcome. Real workload plugins are out of scope for this crate — an
//! agenda wires up commands, not code.

use async_trait::async_trait;
use std::time::Instant;
use tokio::process::Command;
use wa_core::{ExecutionContext, Metric, WaError, Workload};

pub struct ShellWorkload {
    command: String,
    args: Vec<String>,
}

impl ShellWorkload {
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self { command, args }
    }
}

#[async_trait]
impl Workload for ShellWorkload {
    fn name(&self) -> &str {
        self.command.as_str()
    }

    async fn setup(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        Ok(())
    }

    async fn run(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        let start = Instant::now();
        let output = Command::new(&self.command)
            .args(&self.args)
            .output()
            .await
            .map_err(|err| WaError::new(format!("failed to spawn {}: {err}", self.command)))?;
        let elapsed_ms = start.elapsed().as_millis() as f64;

        ctx.add_metric(Metric::new("duration_ms", elapsed_ms).with_units("ms").lower_is_better(true));

        if !output.status.success() {
            return Err(WaError::new(format!("{} exited with {}", self.command, output.status)));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "workload_tests.rs"]
mod tests;
