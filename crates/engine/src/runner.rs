// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Runner: the state machine that dequeues jobs, drives each one
//! through setup/run/teardown, and assembles the run's results. This is
//! the execution core's hard part — everything else in this crate
//! exists to give the Runner somewhere to write its signals and
//! something to retry against.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::Mutex;
use wa_core::{
    Capability, ConfigError, DeviceError, ExecutionContext, InstrumentError, InstrumentHub, Job,
    ParameterMap, ResultManager, RunnerError, Signal, SignalName, SpecId, Status, WaError,
    Workload, WorkloadSpec,
};

use crate::bus::{signal_wrap, SignalBus};
use crate::interrupt::Interrupt;
use crate::reboot::{initial_boot, reboot_device};
use crate::scheduler::Scheduler;

/// Shared handle to the instrument bookkeeping: wrapped in a mutex
/// (rather than threaded as `&mut InstrumentHub` everywhere) because
/// real instruments report failures from their own signal-bus handlers,
/// which only ever see a shared `&ExecutionContext` — they need their
/// own route to flip the hub's failure flag.
pub type SharedInstrumentHub = Arc<Mutex<InstrumentHub>>;

/// Run-level lifecycle states. Result processing is folded into
/// `Finalizing` here: both only ever run back-to-back inside
/// [`Runner::run_shutdown`], so splitting them into a separate
/// transition would add a state change with no decision point attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Constructed,
    Queued,
    Initializing,
    Looping,
    Finalizing,
    Done,
}

/// Severity ranking used to decide whether a late-stage failure (in
/// `update_result` or `teardown`) should overwrite the iteration's
/// status or leave a worse status from an earlier stage alone — a
/// teardown failure must not "demote" an iteration that's already
/// `Failed` down to merely `Noncritical`.
fn severity(status: Status) -> u8 {
    match status {
        Status::Running => 0,
        Status::Ok => 1,
        Status::Noncritical => 2,
        Status::Partial => 3,
        Status::Failed => 4,
        Status::Aborted => 5,
        Status::Skipped => 6,
    }
}

fn escalate(current: Status, candidate: Status) -> Status {
    if severity(candidate) > severity(current) {
        candidate
    } else {
        current
    }
}

/// Fire a signal's full `Before`/`Successful`/`After` triple with an
/// empty body — used for the boundary markers (`IterationStart`,
/// `WorkloadSpecEnd`, `RunInit`, ...) that announce a transition rather
/// than wrap a fallible operation.
async fn fire_inline(bus: &SignalBus, ctx: &mut ExecutionContext, name: SignalName) {
    let _ = signal_wrap::<(), RunnerError, _, _>(bus, ctx, name, |_| async { Ok(()) }).await;
}

/// The job-queue-driven execution loop. Owns the pending queue and the
/// record of every attempt made so far; the device, config and run
/// result it works against live on the [`ExecutionContext`] threaded
/// through every call.
pub struct Runner {
    bus: SignalBus,
    instruments: SharedInstrumentHub,
    result_manager: Arc<ResultManager>,
    job_queue: VecDeque<Job>,
    completed_jobs: Vec<Job>,
    state: RunnerState,
}

impl Runner {
    pub fn new(
        bus: SignalBus,
        instruments: SharedInstrumentHub,
        result_manager: Arc<ResultManager>,
    ) -> Self {
        Self {
            bus,
            instruments,
            result_manager,
            job_queue: VecDeque::new(),
            completed_jobs: Vec::new(),
            state: RunnerState::Constructed,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn completed_jobs(&self) -> &[Job] {
        &self.completed_jobs
    }

    /// Materialize the job queue from `specs` via `scheduler`. The
    /// Runner never reorders the queue after this point — retries are
    /// the only thing that inserts into it again, always at the front.
    pub fn init_queue(&mut self, specs: &[Arc<WorkloadSpec>], scheduler: &dyn Scheduler) {
        self.job_queue = scheduler.schedule(specs).into();
        self.state = RunnerState::Queued;
    }

    pub fn queue_len(&self) -> usize {
        self.job_queue.len()
    }

    /// Run every queued job to completion (or drain), then shut the run
    /// down. Only a startup failure (device/workload/result-manager
    /// initialization, instrumentation reporting a failure before any
    /// iteration ran) returns an error; per-job failures are absorbed
    /// into that job's `IterationResult` instead.
    pub async fn run(
        &mut self,
        ctx: &mut ExecutionContext,
        workloads: &[Arc<dyn Workload>],
        interrupt: &Interrupt,
    ) -> Result<(), RunnerError> {
        self.state = RunnerState::Initializing;
        self.run_start(ctx, workloads).await?;

        self.state = RunnerState::Looping;
        self.loop_jobs(ctx, interrupt).await;

        self.state = RunnerState::Finalizing;
        let outcome = self.run_shutdown(ctx, workloads).await;

        self.state = RunnerState::Done;
        outcome
    }

    // ---- startup -----------------------------------------------------

    async fn run_start(
        &mut self,
        ctx: &mut ExecutionContext,
        workloads: &[Arc<dyn Workload>],
    ) -> Result<(), RunnerError> {
        let bus_inner = self.bus.clone();
        let result_manager = self.result_manager.clone();
        let instruments = self.instruments.clone();
        let workloads: Vec<Arc<dyn Workload>> = workloads.to_vec();

        signal_wrap(&self.bus, ctx, SignalName::RunStart, move |ctx| {
            let bus = bus_inner.clone();
            let result_manager = result_manager.clone();
            let instruments = instruments.clone();
            let workloads = workloads.clone();
            async move {
                ctx.run_result.run_info.start_time = Some(SystemTime::now());

                let policy = ctx.config.reboot_policy;
                initial_boot(&bus, ctx, &policy).await?;

                let device = ctx.device_manager.clone();
                device.initialize(ctx).await?;

                for workload in &workloads {
                    workload.initialize(ctx).await?;
                }

                ctx.run_result.run_info.device_properties = Some(device.info().properties);

                result_manager.initialize(ctx).await?;

                fire_inline(&bus, ctx, SignalName::RunInit).await;

                if instruments.lock().check_failures() {
                    return Err(RunnerError::from(InstrumentError));
                }

                Ok::<(), RunnerError>(())
            }
        })
        .await
    }

    // ---- per-job loop --------------------------------------------------

    async fn loop_jobs(&mut self, ctx: &mut ExecutionContext, interrupt: &Interrupt) {
        let mut previous_spec_id: Option<SpecId> = None;

        while let Some(job) = self.job_queue.pop_front() {
            let spec_changed = previous_spec_id.as_ref() != Some(&job.spec.id);

            if let Err(err) = ctx.next_job(job) {
                tracing::error!(error = %err, "could not prepare iteration output directory; aborting run");
                ctx.aborted = true;
                break;
            }

            self.run_job(ctx, spec_changed, interrupt).await;
            self.finalize_job(ctx, &mut previous_spec_id);

            if ctx.aborted {
                let drain_status = if interrupt.is_set() { Status::Aborted } else { Status::Skipped };
                self.drain_queue(ctx, drain_status);
                break;
            }
        }
    }

    fn finalize_job(&mut self, ctx: &mut ExecutionContext, previous_spec_id: &mut Option<SpecId>) {
        let Some(job) = ctx.current_job.as_ref() else { return };
        *previous_spec_id = Some(job.spec.id.clone());

        if ctx.config.should_retry(job.result.status) && job.retry < ctx.config.max_retries {
            self.job_queue.push_front(job.retry_of());
        }

        let spec = job.spec.clone();
        let retry = job.retry;
        let iteration = job.iteration;
        let result = job.result.clone();
        ctx.end_job();
        self.completed_jobs.push(Job { spec, retry, iteration, result });
    }

    /// Mark every job still in the queue as `status` without running it
    /// and append it straight to the run result, bypassing
    /// `next_job`/`end_job` (which exist for jobs that actually execute).
    fn drain_queue(&mut self, ctx: &mut ExecutionContext, status: Status) {
        while let Some(mut job) = self.job_queue.pop_front() {
            job.result.status = status;
            ctx.run_result.iteration_results.push(job.result);
        }
    }

    // ---- one job --------------------------------------------------------

    async fn run_job(&mut self, ctx: &mut ExecutionContext, spec_changed: bool, interrupt: &Interrupt) {
        let Some(spec) = ctx.current_job.as_ref().map(|job| job.spec.clone()) else {
            return;
        };

        if !spec.enabled() {
            self.set_current_status(ctx, Status::Skipped);
            return;
        }

        self.run_job_inner(ctx, &spec, spec_changed, interrupt).await;

        if let Err(err) = ctx.device_manager.clone().stop().await {
            tracing::warn!(error = %err, "device.stop failed");
        }
    }

    async fn run_job_inner(
        &mut self,
        ctx: &mut ExecutionContext,
        spec: &Arc<WorkloadSpec>,
        spec_changed: bool,
        interrupt: &Interrupt,
    ) {
        if interrupt.is_set() {
            self.abort_current_job(ctx).await;
            return;
        }

        if let Err(err) = self.perform_reboot_decision(ctx, spec, spec_changed).await {
            self.record_event(ctx, "rebooting device", &err);
            self.set_current_status(ctx, Status::Failed);
            ctx.aborted = true;
            return;
        }

        {
            let mut hub = self.instruments.lock();
            hub.disable_all();
            hub.enable(&spec.instrumentation);
        }

        if let Err(err) = ctx.device_manager.clone().start().await {
            self.record_event(ctx, "starting device", &err);
            self.set_current_status(ctx, Status::Failed);
            return;
        }

        if spec_changed {
            self.fire(ctx, SignalName::WorkloadSpecStart).await;
        }
        self.fire(ctx, SignalName::IterationStart).await;

        let params_result = ctx.device_manager.clone().set_runtime_parameters(&spec.runtime_parameters).await;
        match params_result {
            Ok(()) => self.run_workload_iteration(ctx, spec).await,
            Err(err) => {
                self.record_event(ctx, "Setting up device parameters", &err);
                self.set_current_status(ctx, Status::Failed);
                spec.disable();
            }
        }

        if interrupt.is_set() {
            self.fire(ctx, SignalName::IterationEnd).await;
            self.fire(ctx, SignalName::WorkloadSpecEnd).await;
            self.set_current_status(ctx, Status::Aborted);
            return;
        }

        self.fire(ctx, SignalName::IterationEnd).await;

        let spec_will_change = !spec.enabled() || self.next_job_has_different_spec(spec);
        if spec_will_change {
            self.fire(ctx, SignalName::WorkloadSpecEnd).await;
        }
    }

    async fn abort_current_job(&mut self, ctx: &mut ExecutionContext) {
        self.fire(ctx, SignalName::IterationEnd).await;
        self.fire(ctx, SignalName::WorkloadSpecEnd).await;
        self.set_current_status(ctx, Status::Aborted);
    }

    fn next_job_has_different_spec(&self, spec: &Arc<WorkloadSpec>) -> bool {
        match self.job_queue.front() {
            Some(next) => next.spec.id != spec.id,
            None => true,
        }
    }

    /// Reboot decision, in priority order: an explicit per-spec flash
    /// request, then "no reboot yet" for the very first job, then the
    /// two reboot-policy booleans.
    async fn perform_reboot_decision(
        &mut self,
        ctx: &mut ExecutionContext,
        spec: &Arc<WorkloadSpec>,
        spec_changed: bool,
    ) -> Result<(), RunnerError> {
        let policy = ctx.config.reboot_policy;

        if let Some(flash_params) = spec.flash.clone() {
            if !policy.can_reboot {
                return Err(ConfigError::FlashNotPermitted.into());
            }
            if !ctx.device_manager.can(Capability::Flash) {
                return Err(ConfigError::DeviceCannotFlash.into());
            }
            self.flash_device(ctx, &flash_params).await?;
            return Ok(());
        }

        if self.completed_jobs.is_empty() {
            return Ok(());
        }

        if policy.can_reboot && policy.reboot_on_each_spec && spec_changed {
            reboot_device(&self.bus, ctx, &spec.boot_parameters, false).await?;
            return Ok(());
        }

        if policy.can_reboot && policy.reboot_on_each_iteration {
            reboot_device(&self.bus, ctx, &spec.boot_parameters, false).await?;
        }

        Ok(())
    }

    async fn flash_device(&mut self, ctx: &mut ExecutionContext, params: &ParameterMap) -> Result<(), DeviceError> {
        let params = params.clone();
        signal_wrap(&self.bus, ctx, SignalName::Flashing, |ctx| {
            let device = ctx.device_manager.clone();
            async move { device.flash(&params).await }
        })
        .await
    }

    // ---- workload iteration (setup/run/result-update/teardown) --------

    async fn run_workload_iteration(&mut self, ctx: &mut ExecutionContext, spec: &Arc<WorkloadSpec>) {
        let workload = spec.workload.clone();

        let setup_result = signal_wrap(&self.bus, ctx, SignalName::WorkloadSetup, |ctx| {
            let workload = workload.clone();
            async move { workload.setup(ctx).await }
        })
        .await;

        let setup_ok = setup_result.is_ok();
        if let Err(err) = setup_result {
            self.record_event(ctx, "setup", &err);
            self.set_current_status(ctx, Status::Failed);
            spec.disable();
        }

        if setup_ok {
            let run_outcome = signal_wrap(&self.bus, ctx, SignalName::WorkloadExecution, |ctx| {
                let workload = workload.clone();
                async move { workload.run(ctx).await }
            })
            .await;

            if let Err(err) = run_outcome {
                self.handle_workload_run_error(ctx, spec, err).await;
            }

            self.bus.send(Signal::before(SignalName::WorkloadResultUpdate), ctx);
            if self.current_status(ctx) != Status::Failed {
                match workload.update_result(ctx).await {
                    Ok(()) => self.bus.send(Signal::successful(SignalName::WorkloadResultUpdate), ctx),
                    Err(err) => {
                        self.record_event(ctx, "update_result", &err);
                        self.escalate_current_status(ctx, Status::Partial);
                    }
                }
            }
            if self.current_status(ctx) == Status::Running {
                self.set_current_status(ctx, Status::Ok);
            }
            self.bus.send(Signal::after(SignalName::WorkloadResultUpdate), ctx);

            let teardown_outcome = signal_wrap(&self.bus, ctx, SignalName::WorkloadTeardown, |ctx| {
                let workload = workload.clone();
                async move { workload.teardown(ctx).await }
            })
            .await;

            if let Err(err) = teardown_outcome {
                self.record_event(ctx, "teardown", &err);
                self.escalate_current_status(ctx, Status::Noncritical);
            }
        }

        // Submitted unconditionally: even a setup failure produces a
        // Failed iteration result that result processors must see.
        let result_manager = self.result_manager.clone();
        if let Some(job) = ctx.current_job.as_ref() {
            let snapshot = job.result.clone();
            if let Err(err) = result_manager.add_result(&snapshot, ctx).await {
                tracing::error!(error = %err, "result processor failed to record iteration result");
                self.bus.send(Signal::ErrorLogged, ctx);
            }
        }
    }

    async fn handle_workload_run_error(&mut self, ctx: &mut ExecutionContext, spec: &Arc<WorkloadSpec>, err: WaError) {
        self.record_event(ctx, spec.workload.name(), &err);
        self.set_current_status(ctx, Status::Failed);
        self.capture_screenshot_best_effort(ctx).await;

        let device = ctx.device_manager.clone();
        if device.check_responsive().await.is_err() {
            tracing::warn!(spec = %spec.label, "device unresponsive after workload failure; attempting recovery");
            let can_hard_reset = device.can(Capability::ResetPower) && ctx.config.reboot_policy.can_reboot;
            let recovered = can_hard_reset
                && reboot_device(&self.bus, ctx, &spec.boot_parameters, true).await.is_ok();
            if !recovered {
                ctx.aborted = true;
            }
        }
    }

    async fn capture_screenshot_best_effort(&mut self, ctx: &mut ExecutionContext) {
        let path = ctx.output_directory.join("screenshot.png");
        let device = ctx.device_manager.clone();
        match device.capture_screen(&path).await {
            Ok(()) => {
                if let Err(err) = ctx.add_artifact("screenshot", path, wa_core::ArtifactKind::Raw) {
                    tracing::warn!(error = %err, "screenshot captured but could not be registered as an artifact");
                }
            }
            Err(err) => tracing::warn!(error = %err, "screenshot capture failed (best effort)"),
        }
    }

    // ---- shutdown -------------------------------------------------------

    async fn run_shutdown(
        &mut self,
        ctx: &mut ExecutionContext,
        workloads: &[Arc<dyn Workload>],
    ) -> Result<(), RunnerError> {
        for workload in workloads {
            if let Err(err) = workload.finalize(ctx).await {
                tracing::error!(error = %err, "workload finalize failed");
                self.bus.send(Signal::ErrorLogged, ctx);
            }
        }

        self.fire(ctx, SignalName::RunFin).await;

        if let Err(err) = ctx.device_manager.clone().disconnect().await {
            tracing::warn!(error = %err, "device disconnect failed");
        }

        let now = SystemTime::now();
        ctx.run_result.run_info.end_time = Some(now);
        ctx.run_result.run_info.duration =
            ctx.run_result.run_info.start_time.and_then(|start| now.duration_since(start).ok());

        let bus = self.bus.clone();
        let result_manager = self.result_manager.clone();
        signal_wrap(&bus, ctx, SignalName::OverallResultsProcessing, |ctx| {
            let result_manager = result_manager.clone();
            async move {
                let snapshot = ctx.run_result.clone();
                result_manager.process_run_result(&snapshot, ctx).await
            }
        })
        .await?;

        if self.instruments.lock().check_failures() {
            ctx.run_result.non_iteration_errors = true;
        }

        self.result_manager.finalize(ctx).await?;

        self.fire(ctx, SignalName::RunEnd).await;

        Ok(())
    }

    // ---- small helpers ---------------------------------------------------

    async fn fire(&self, ctx: &mut ExecutionContext, name: SignalName) {
        fire_inline(&self.bus, ctx, name).await;
    }

    fn current_status(&self, ctx: &ExecutionContext) -> Status {
        ctx.job_status().unwrap_or(Status::Running)
    }

    fn set_current_status(&mut self, ctx: &mut ExecutionContext, status: Status) {
        if let Some(job) = ctx.current_job.as_mut() {
            job.result.status = status;
        }
    }

    fn escalate_current_status(&mut self, ctx: &mut ExecutionContext, candidate: Status) {
        if let Some(job) = ctx.current_job.as_mut() {
            job.result.status = escalate(job.result.status, candidate);
        }
    }

    fn record_event(&mut self, ctx: &mut ExecutionContext, label: &str, err: &impl std::fmt::Display) {
        let message = format!("{label}: {err}");
        tracing::error!(%message, "iteration error");
        if let Some(job) = ctx.current_job.as_mut() {
            job.result.events.push(message);
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
