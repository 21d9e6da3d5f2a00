// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A test-support instrument that records every signal it sees.

use parking_lot::Mutex;
use std::sync::Arc;
use wa_core::Instrument;
use wa_engine::SignalBus;

const WATCHED: [wa_core::SignalName; 13] = [
    wa_core::SignalName::RunInit,
    wa_core::SignalName::RunStart,
    wa_core::SignalName::RunEnd,
    wa_core::SignalName::RunFin,
    wa_core::SignalName::WorkloadSpecStart,
    wa_core::SignalName::WorkloadSpecEnd,
    wa_core::SignalName::IterationStart,
    wa_core::SignalName::IterationEnd,
    wa_core::SignalName::WorkloadSetup,
    wa_core::SignalName::WorkloadExecution,
    wa_core::SignalName::WorkloadTeardown,
    wa_core::SignalName::WorkloadResultUpdate,
    wa_core::SignalName::OverallResultsProcessing,
];

/// Subscribes to every lifecycle signal on construction and records
/// `(iteration, name, phase)` triples in dispatch order — the way a
/// real energy-probe or trace-capture instrument would hook in, minus
/// the actual measurement. Grounded in the `FakeDevice`/`FakeWorkload`
/// pattern: a thin recorder that lets a test assert on what actually
/// happened rather than stub the behavior under test.
#[derive(Clone)]
pub struct RecordingInstrument {
    name: String,
    trace: Arc<Mutex<Vec<(Option<u32>, wa_core::SignalName, wa_core::Phase)>>>,
}

impl RecordingInstrument {
    /// Build and immediately connect to every watched signal on `bus`.
    /// Instrument construction is out of scope for the execution core —
    /// by the time `Arc<dyn Instrument>` reaches `ExecutorInputs`, it is
    /// expected to already be wired up like this.
    pub fn new(name: impl Into<String>, bus: &SignalBus) -> Self {
        let this = Self { name: name.into(), trace: Arc::new(Mutex::new(Vec::new())) };
        for name in WATCHED {
            for phase in [wa_core::Phase::Before, wa_core::Phase::Successful, wa_core::Phase::After] {
                let trace = this.trace.clone();
                bus.connect(wa_core::Signal::Phased(name, phase), move |ctx| {
                    trace.lock().push((ctx.current_iteration(), name, phase));
                    Ok(())
                });
            }
        }
        this
    }

    pub fn trace(&self) -> Vec<(Option<u32>, wa_core::SignalName, wa_core::Phase)> {
        self.trace.lock().clone()
    }
}

impl Instrument for RecordingInstrument {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "recording_tests.rs"]
mod tests;
