// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The workload capability: the thing a job actually runs.

use crate::artifact::Artifact;
use crate::context::ExecutionContext;
use crate::error::{ConfigError, WaError};
use async_trait::async_trait;

/// A runnable workload. Every hook except `setup` and `run` has a no-op
/// default so that a minimal workload only needs to implement the two
/// methods that actually do work.
///
/// All hooks take `&mut ExecutionContext`: only one job is ever in
/// flight, so there is no concurrent-access hazard in threading a plain
/// mutable reference through instead of reaching for interior mutability.
#[async_trait]
pub trait Workload: Send + Sync {
    fn name(&self) -> &str;

    /// Artifacts this workload pre-registers regardless of outcome (its
    /// log file, a results file it always writes, etc).
    fn artifacts(&self) -> &[Artifact] {
        &[]
    }

    /// Validate configuration eagerly, before any device work starts.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// One-time resource acquisition (revision lookup, file download).
    /// Called once per run, not per iteration.
    async fn init_resources(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }

    /// One-time workload initialization, after resources are ready.
    async fn initialize(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }

    /// Per-iteration setup (install, configure, prime caches).
    async fn setup(&self, ctx: &mut ExecutionContext) -> Result<(), WaError>;

    /// Run the workload body and collect whatever raw output it produces.
    async fn run(&self, ctx: &mut ExecutionContext) -> Result<(), WaError>;

    /// Turn raw output collected by `run` into metrics/artifacts.
    async fn update_result(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }

    /// Per-iteration cleanup. Always attempted, even after a failed run.
    async fn teardown(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }

    /// One-time teardown at the end of the run.
    async fn finalize(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }
}
