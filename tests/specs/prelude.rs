//! Shared helpers for the end-to-end execution-core specs.
//!
//! Unlike the per-crate unit tests, these drive `wa_engine::Executor`
//! directly against `FakeDevice`/`FakeWorkload` pairs the way a CLI
//! front door would, and assert on the whole run's outcome rather than
//! one Runner method at a time.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

pub use std::sync::Arc;

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

pub use wa_adapters::RecordingInstrument;
pub use wa_adapters::device::fake::FakeDevice;
pub use wa_adapters::workload::fake::FakeWorkload;
pub use wa_core::{Config, FilesystemResolver, Phase, ResourceResolver, SignalName, Status, WorkloadSpec};
pub use wa_engine::{Executor, ExecutorInputs, Interrupt, SignalBus};

static SCRATCH_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A unique output directory under the system temp dir so parallel test
/// runs never collide. Not pre-created: `ExecutionContext::initialize`
/// does that.
pub fn scratch_dir(label: &str) -> PathBuf {
    let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("wa-spec-{label}-{}-{n}", std::process::id()))
}

pub fn config(label: &str) -> Config {
    Config::new(scratch_dir(label), "fake")
}

/// Build one spec with a fresh `FakeWorkload` and `n` iterations.
pub fn spec(id: &str, label: &str, workload: FakeWorkload, iterations: u32) -> Arc<WorkloadSpec> {
    Arc::new(WorkloadSpec::new(id, label, Arc::new(workload), iterations))
}

/// Assemble `ExecutorInputs` around `bus`, with no instruments/result
/// processors installed. Callers that need a `RecordingInstrument`
/// should build it against `bus` first (so its handlers are live before
/// the run starts) and push it onto the returned value's `instruments`.
pub fn inputs_with_bus(
    device: FakeDevice,
    config: Config,
    specs: Vec<Arc<WorkloadSpec>>,
    bus: SignalBus,
) -> ExecutorInputs {
    let resolver: Arc<dyn ResourceResolver> = Arc::new(FilesystemResolver::new(vec![]));
    ExecutorInputs {
        device: Arc::new(device),
        resolver,
        config: Arc::new(config),
        specs,
        instruments: Vec::new(),
        result_processors: Vec::new(),
        bus,
    }
}

pub fn inputs(device: FakeDevice, config: Config, specs: Vec<Arc<WorkloadSpec>>) -> ExecutorInputs {
    inputs_with_bus(device, config, specs, SignalBus::new())
}

pub async fn run_to_completion(inputs: ExecutorInputs) -> wa_core::ExecutionContext {
    Executor::run(inputs, Interrupt::new()).await.expect("run should complete")
}
