// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Executor: the front door that turns a loaded agenda into a
//! finished run. It owns everything that happens exactly once per run
//! and only once — context construction, instrument/processor
//! installation, pre-run flashing, scheduler selection — then hands off
//! to the [`Runner`] for the part that repeats per job.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use wa_core::{
    Capability, Config, Device, ExecutionContext, ExecutionOrder, Instrument, InstrumentHub,
    ParameterMap, ResourceResolver, ResultManager, ResultProcessor, RunnerError, SignalName,
    WaError, Workload, WorkloadSpec,
};

use crate::bus::{signal_wrap, SignalBus};
use crate::interrupt::Interrupt;
use crate::runner::{Runner, SharedInstrumentHub};
use crate::scheduler::{
    ByIterationScheduler, BySectionScheduler, BySpecScheduler, RandomScheduler, Scheduler,
};

/// Everything the Executor needs to assemble and drive one run. A CLI
/// (or a test) is responsible for loading the agenda and wiring up the
/// device adapter, instruments and result processors named in it; the
/// Executor only knows how to turn those parts into a finished run.
pub struct ExecutorInputs {
    pub device: Arc<dyn Device>,
    pub resolver: Arc<dyn ResourceResolver>,
    pub config: Arc<Config>,
    pub specs: Vec<Arc<WorkloadSpec>>,
    pub instruments: Vec<Arc<dyn Instrument>>,
    pub result_processors: Vec<Arc<dyn ResultProcessor>>,
    /// The signal bus instruments and the logging layer were wired up
    /// against before the run started. Instrument/result-processor
    /// construction is out of scope for the core (already-instantiated
    /// objects arrive via the fields above), but an instrument still
    /// needs a live bus to `connect` its handlers to at construction
    /// time — so the bus is built by the caller and handed in here
    /// rather than created fresh inside the Executor, which would
    /// orphan any handler an instrument registered before the run.
    pub bus: SignalBus,
}

pub struct Executor;

impl Executor {
    /// Run an agenda to completion. Returns the finished
    /// `ExecutionContext` — its `run_result` is the summary data — even
    /// when individual iterations failed; only a startup failure
    /// (validation, device/workload initialization, instrumentation
    /// reporting a failure before any iteration ran) surfaces as `Err`.
    pub async fn run(
        inputs: ExecutorInputs,
        interrupt: Interrupt,
    ) -> Result<ExecutionContext, RunnerError> {
        let ExecutorInputs { device, resolver, config, specs, instruments, result_processors, bus } =
            inputs;

        let workloads: Vec<Arc<dyn Workload>> = specs.iter().map(|s| s.workload.clone()).collect();

        let mut ctx = ExecutionContext::new(device, config.clone(), resolver);
        ctx.initialize().map_err(|err| WaError::new(err.to_string()))?;

        let mut hub = InstrumentHub::new();
        for instrument in instruments {
            hub.install(instrument);
        }
        hub.validate()?;
        hub.enable_all();

        let mut result_manager = ResultManager::new();
        for processor in result_processors {
            result_manager.install(processor);
        }
        result_manager.validate()?;

        for workload in &workloads {
            workload.validate()?;
        }
        for workload in &workloads {
            workload.init_resources(&mut ctx).await?;
        }

        flash_if_configured(&bus, &mut ctx, &config).await?;

        warn_if_degenerate_policy(&config);

        let scheduler: Box<dyn Scheduler> = match config.execution_order {
            ExecutionOrder::ByIteration => Box::new(ByIterationScheduler),
            ExecutionOrder::BySpec => Box::new(BySpecScheduler),
            ExecutionOrder::BySection => Box::new(BySectionScheduler),
            ExecutionOrder::Random => Box::new(RandomScheduler::new(config.random_seed)),
        };

        let instruments: SharedInstrumentHub = Arc::new(Mutex::new(hub));
        let mut runner = Runner::new(bus.clone(), instruments, Arc::new(result_manager));
        runner.init_queue(&specs, scheduler.as_ref());

        let started = Instant::now();
        let outcome = runner.run(&mut ctx, &workloads, &interrupt).await;
        log_summary(&ctx, &bus, started.elapsed());

        outcome.map(|()| ctx)
    }
}

/// One-time pre-run flash, distinct from a per-spec `flash` request
/// (those are handled inside the Runner's reboot decision): applies
/// `config.flashing_config`, if present, before the job queue starts.
async fn flash_if_configured(
    bus: &SignalBus,
    ctx: &mut ExecutionContext,
    config: &Config,
) -> Result<(), RunnerError> {
    let Some(flashing_config) = &config.flashing_config else {
        return Ok(());
    };

    if !ctx.device_manager.can(Capability::Flash) {
        return Err(wa_core::ConfigError::DeviceCannotFlash.into());
    }

    let params: ParameterMap = flashing_config.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

    signal_wrap(bus, ctx, SignalName::Flashing, |ctx| {
        let device = ctx.device_manager.clone();
        let params = params.clone();
        async move { device.flash(&params).await }
    })
    .await
    .map_err(RunnerError::from)
}

/// `by_iteration` ordering only ever runs one iteration of each spec per
/// pass, so `reboot_on_each_spec` without `reboot_on_each_iteration`
/// reboots on every single iteration anyway — not wrong, just not what
/// the policy name promises under this ordering.
fn warn_if_degenerate_policy(config: &Config) {
    if config.execution_order == ExecutionOrder::ByIteration
        && config.reboot_policy.reboot_on_each_spec
        && !config.reboot_policy.reboot_on_each_iteration
    {
        tracing::warn!(
            "by_iteration execution order with reboot_on_each_spec reboots every iteration; \
             each pass only ever advances one iteration per spec"
        );
    }
}

fn log_summary(ctx: &ExecutionContext, bus: &SignalBus, elapsed: std::time::Duration) {
    let histogram: Vec<String> = ctx
        .run_result
        .status_histogram()
        .into_iter()
        .map(|(status, count)| format!("{status}={count}"))
        .collect();

    tracing::info!(
        duration = ?elapsed,
        histogram = %histogram.join(", "),
        output = %ctx.run_output_directory.display(),
        "run finished"
    );

    if bus.error_logged() || bus.warning_logged() {
        tracing::info!(log_file = %ctx.config.log_file.display(), "see the run log for details");
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
