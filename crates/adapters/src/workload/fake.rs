// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake workload adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use wa_core::{Artifact, ExecutionContext, Metric, WaError, Workload};

/// Recorded workload call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadCall {
    InitResources,
    Initialize,
    Setup,
    Run,
    UpdateResult,
    Teardown,
    Finalize,
}

struct FakeWorkloadState {
    calls: Vec<WorkloadCall>,
    setup_error: Option<String>,
    run_error: Option<String>,
    update_result_error: Option<String>,
    teardown_error: Option<String>,
}

/// Fake workload adapter for testing. Records every hook invocation and
/// lets a test script configure any single hook to fail on its next
/// call, so scenario tests can assert on the Runner's reaction without
/// a real benchmark or UI-automation workload behind it.
#[derive(Clone)]
pub struct FakeWorkload {
    name: String,
    metrics: Vec<Metric>,
    artifacts: Vec<Artifact>,
    inner: Arc<Mutex<FakeWorkloadState>>,
}

impl FakeWorkload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: Vec::new(),
            artifacts: Vec::new(),
            inner: Arc::new(Mutex::new(FakeWorkloadState {
                calls: Vec::new(),
                setup_error: None,
                run_error: None,
                update_result_error: None,
                teardown_error: None,
            })),
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    pub fn calls(&self) -> Vec<WorkloadCall> {
        self.inner.lock().calls.clone()
    }

    pub fn fail_setup(&self, message: impl Into<String>) {
        self.inner.lock().setup_error = Some(message.into());
    }

    pub fn fail_run(&self, message: impl Into<String>) {
        self.inner.lock().run_error = Some(message.into());
    }

    pub fn fail_update_result(&self, message: impl Into<String>) {
        self.inner.lock().update_result_error = Some(message.into());
    }

    pub fn fail_teardown(&self, message: impl Into<String>) {
        self.inner.lock().teardown_error = Some(message.into());
    }
}

#[async_trait]
impl Workload for FakeWorkload {
    fn name(&self) -> &str {
        &self.name
    }

    fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    async fn init_resources(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::InitResources);
        Ok(())
    }

    async fn initialize(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::Initialize);
        Ok(())
    }

    async fn setup(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::Setup);
        if let Some(message) = self.inner.lock().setup_error.take() {
            return Err(WaError::new(message));
        }
        Ok(())
    }

    async fn run(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::Run);
        if let Some(message) = self.inner.lock().run_error.take() {
            return Err(WaError::new(message));
        }
        Ok(())
    }

    async fn update_result(&self, ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::UpdateResult);
        if let Some(message) = self.inner.lock().update_result_error.take() {
            return Err(WaError::new(message));
        }
        for metric in &self.metrics {
            ctx.add_metric(metric.clone());
        }
        Ok(())
    }

    async fn teardown(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::Teardown);
        if let Some(message) = self.inner.lock().teardown_error.take() {
            return Err(WaError::new(message));
        }
        Ok(())
    }

    async fn finalize(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        self.inner.lock().calls.push(WorkloadCall::Finalize);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
