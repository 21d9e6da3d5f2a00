// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result processors: consumers of iteration and run results, installed
//! by configuration (JSON-lines file, CSV summary, a reporting webhook).

use crate::context::ExecutionContext;
use crate::error::{ConfigError, WaError};
use crate::result::{IterationResult, RunResult};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ResultProcessor: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    async fn initialize(&self, ctx: &ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }

    async fn add_result(
        &self,
        result: &IterationResult,
        ctx: &ExecutionContext,
    ) -> Result<(), WaError>;

    async fn process_run_result(
        &self,
        run_result: &RunResult,
        ctx: &ExecutionContext,
    ) -> Result<(), WaError> {
        let _ = (run_result, ctx);
        Ok(())
    }

    async fn finalize(&self, ctx: &ExecutionContext) -> Result<(), WaError> {
        let _ = ctx;
        Ok(())
    }
}

/// Fans calls out to every installed processor, continuing past a
/// processor that fails to validate so the remainder still gets a
/// chance to run — a broken reporter should not prevent iteration
/// results from reaching the ones that work.
#[derive(Default)]
pub struct ResultManager {
    processors: Vec<Arc<dyn ResultProcessor>>,
}

impl ResultManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, processor: Arc<dyn ResultProcessor>) {
        self.processors.push(processor);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for processor in &self.processors {
            processor.validate()?;
        }
        Ok(())
    }

    pub async fn initialize(&self, ctx: &ExecutionContext) -> Result<(), WaError> {
        for processor in &self.processors {
            processor.initialize(ctx).await?;
        }
        Ok(())
    }

    pub async fn add_result(
        &self,
        result: &IterationResult,
        ctx: &ExecutionContext,
    ) -> Result<(), WaError> {
        for processor in &self.processors {
            processor.add_result(result, ctx).await?;
        }
        Ok(())
    }

    pub async fn process_run_result(
        &self,
        run_result: &RunResult,
        ctx: &ExecutionContext,
    ) -> Result<(), WaError> {
        for processor in &self.processors {
            processor.process_run_result(run_result, ctx).await?;
        }
        Ok(())
    }

    pub async fn finalize(&self, ctx: &ExecutionContext) -> Result<(), WaError> {
        for processor in &self.processors {
            processor.finalize(ctx).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "result_manager_tests.rs"]
mod tests;
