// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default result processor: appends one JSON object per iteration
//! result to a file under the run's output directory.

use async_trait::async_trait;
use serde_json::json;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use wa_core::{ExecutionContext, IterationResult, ResultProcessor, RunResult, WaError};

pub struct JsonLinesProcessor {
    filename: String,
}

impl JsonLinesProcessor {
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into() }
    }
}

impl Default for JsonLinesProcessor {
    fn default() -> Self {
        Self::new("results.jsonl")
    }
}

async fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new().create(true).append(true).open(path).await?;
    file.write_all(line.as_bytes()).await?;
    file.write_all(b"\n").await?;
    Ok(())
}

fn iteration_line(result: &IterationResult) -> String {
    json!({
        "status": result.status.to_string(),
        "iteration": result.iteration,
        "events": result.events,
        "metrics": result.metrics,
        "output_directory": result.output_directory.as_ref().map(|p: &PathBuf| p.display().to_string()),
    })
    .to_string()
}

#[async_trait]
impl ResultProcessor for JsonLinesProcessor {
    fn name(&self) -> &str {
        "jsonlines"
    }

    async fn add_result(
        &self,
        result: &IterationResult,
        ctx: &ExecutionContext,
    ) -> Result<(), WaError> {
        let path = ctx.run_output_directory.join(&self.filename);
        append_line(&path, &iteration_line(result))
            .await
            .map_err(|e| WaError::new(e.to_string()))
    }

    async fn process_run_result(
        &self,
        run_result: &RunResult,
        ctx: &ExecutionContext,
    ) -> Result<(), WaError> {
        let path = ctx.run_output_directory.join("run_metrics.jsonl");
        for metric in &run_result.metrics {
            let line = serde_json::to_string(metric).map_err(|e| WaError::new(e.to_string()))?;
            append_line(&path, &line).await.map_err(|e| WaError::new(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "jsonlines_tests.rs"]
mod tests;
