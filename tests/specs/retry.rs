//! Retry-bound specs, exercised through the whole `Executor::run` loop.
//!
//! `FakeWorkload::fail_run` only fails its *next* call, which is enough
//! to cover "fails once, recovers on retry" but not "never recovers" —
//! for that one a minimal always-failing workload is defined below,
//! shaped the same way `FakeWorkload` is but with no way to clear its
//! error.

use crate::prelude::*;
use async_trait::async_trait;
use wa_core::{ExecutionContext, WaError, Workload};

struct AlwaysFailsWorkload;

#[async_trait]
impl Workload for AlwaysFailsWorkload {
    fn name(&self) -> &str {
        "always-fails"
    }

    async fn setup(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        Ok(())
    }

    async fn run(&self, _ctx: &mut ExecutionContext) -> Result<(), WaError> {
        Err(WaError::new("never recovers"))
    }
}

#[tokio::test]
async fn recovers_on_the_first_retry_and_records_both_attempts() {
    let workload = FakeWorkload::new("wl");
    workload.fail_run("first attempt fails");
    let s = spec("s1", "spec-one", workload, 1);

    let mut cfg = config("retry-recovers");
    cfg.max_retries = 1;

    let built = inputs(FakeDevice::new("d1"), cfg, vec![s]);
    let ctx = run_to_completion(built).await;

    let statuses: Vec<Status> = ctx.run_result.iteration_results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Status::Failed, Status::Ok]);
}

#[tokio::test]
async fn exhausts_the_configured_retry_bound_without_a_fourth_attempt() {
    let s = Arc::new(wa_core::WorkloadSpec::new(
        "s1",
        "spec-one",
        Arc::new(AlwaysFailsWorkload),
        1,
    ));

    let mut cfg = config("retry-exhausted");
    cfg.max_retries = 2;

    let built = inputs(FakeDevice::new("d1"), cfg, vec![s]);
    let ctx = run_to_completion(built).await;

    // One original attempt plus two retries, all failed: no fourth attempt.
    let statuses: Vec<Status> = ctx.run_result.iteration_results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Status::Failed, Status::Failed, Status::Failed]);
}
