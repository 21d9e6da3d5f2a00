//! End-to-end signal-trace and ordering specs, driven through
//! `wa_engine::Executor` rather than the Runner directly — these are the
//! invariants from the execution core's testable-properties list that
//! only show up once a whole run, not one Runner method, is exercised.

use crate::prelude::*;

#[tokio::test]
async fn one_spec_one_iteration_happy_path_matches_the_canonical_trace() {
    let bus = SignalBus::new();
    let recorder = RecordingInstrument::new("trace", &bus);
    let s = spec("s1", "spec-one", FakeWorkload::new("wl"), 1);

    let mut built = inputs_with_bus(FakeDevice::new("d1"), config("s1"), vec![s], bus);
    built.instruments = vec![Arc::new(recorder.clone())];

    let ctx = run_to_completion(built).await;

    assert_eq!(ctx.run_result.iteration_results.len(), 1);
    assert_eq!(ctx.run_result.iteration_results[0].status, Status::Ok);

    let iter1: Vec<(SignalName, Phase)> = recorder
        .trace()
        .into_iter()
        .filter(|(it, _, _)| *it == Some(1))
        .map(|(_, n, p)| (n, p))
        .collect();

    assert_eq!(
        iter1,
        vec![
            (SignalName::IterationStart, Phase::Before),
            (SignalName::IterationStart, Phase::Successful),
            (SignalName::IterationStart, Phase::After),
            (SignalName::WorkloadSetup, Phase::Before),
            (SignalName::WorkloadSetup, Phase::Successful),
            (SignalName::WorkloadSetup, Phase::After),
            (SignalName::WorkloadExecution, Phase::Before),
            (SignalName::WorkloadExecution, Phase::Successful),
            (SignalName::WorkloadExecution, Phase::After),
            (SignalName::WorkloadResultUpdate, Phase::Before),
            (SignalName::WorkloadResultUpdate, Phase::Successful),
            (SignalName::WorkloadResultUpdate, Phase::After),
            (SignalName::WorkloadTeardown, Phase::Before),
            (SignalName::WorkloadTeardown, Phase::Successful),
            (SignalName::WorkloadTeardown, Phase::After),
            (SignalName::IterationEnd, Phase::Before),
            (SignalName::IterationEnd, Phase::Successful),
            (SignalName::IterationEnd, Phase::After),
        ]
    );
}

#[tokio::test]
async fn iteration_end_of_job_n_precedes_iteration_start_of_job_n_plus_1() {
    let bus = SignalBus::new();
    let recorder = RecordingInstrument::new("trace", &bus);
    let s = spec("s1", "spec-one", FakeWorkload::new("wl"), 3);

    let mut built = inputs_with_bus(FakeDevice::new("d1"), config("ordering"), vec![s], bus);
    built.instruments = vec![Arc::new(recorder.clone())];

    let ctx = run_to_completion(built).await;
    assert_eq!(ctx.run_result.iteration_results.len(), 3);

    let boundaries: Vec<(Option<u32>, SignalName, Phase)> = recorder
        .trace()
        .into_iter()
        .filter(|(_, n, p)| {
            matches!(n, SignalName::IterationStart | SignalName::IterationEnd) && *p == Phase::Before
        })
        .collect();

    assert_eq!(
        boundaries,
        vec![
            (Some(1), SignalName::IterationStart, Phase::Before),
            (Some(1), SignalName::IterationEnd, Phase::Before),
            (Some(2), SignalName::IterationStart, Phase::Before),
            (Some(2), SignalName::IterationEnd, Phase::Before),
            (Some(3), SignalName::IterationStart, Phase::Before),
            (Some(3), SignalName::IterationEnd, Phase::Before),
        ]
    );
}

#[tokio::test]
async fn spec_end_of_previous_spec_precedes_spec_start_of_next() {
    let bus = SignalBus::new();
    let recorder = RecordingInstrument::new("trace", &bus);
    let a = spec("a", "A", FakeWorkload::new("a"), 1);
    let b = spec("b", "B", FakeWorkload::new("b"), 1);

    let mut built = inputs_with_bus(FakeDevice::new("d1"), config("spec-boundary"), vec![a, b], bus);
    built.instruments = vec![Arc::new(recorder.clone())];

    let ctx = run_to_completion(built).await;
    assert_eq!(ctx.run_result.iteration_results.len(), 2);

    let spec_signals: Vec<(SignalName, Phase)> = recorder
        .trace()
        .into_iter()
        .filter(|(_, n, _)| matches!(n, SignalName::WorkloadSpecStart | SignalName::WorkloadSpecEnd))
        .map(|(_, n, p)| (n, p))
        .collect();

    let end_a = spec_signals
        .iter()
        .position(|(n, p)| *n == SignalName::WorkloadSpecEnd && *p == Phase::Before)
        .unwrap();
    let start_b = spec_signals
        .iter()
        .rposition(|(n, p)| *n == SignalName::WorkloadSpecStart && *p == Phase::Before)
        .unwrap();
    assert!(end_a < start_b, "spec A's end must precede spec B's start: {spec_signals:?}");
}

#[tokio::test]
async fn every_before_has_exactly_one_after_before_the_next_before_of_the_same_name() {
    let bus = SignalBus::new();
    let recorder = RecordingInstrument::new("trace", &bus);
    let s = spec("s1", "spec-one", FakeWorkload::new("wl"), 2);

    let mut built = inputs_with_bus(FakeDevice::new("d1"), config("before-after"), vec![s], bus);
    built.instruments = vec![Arc::new(recorder.clone())];

    run_to_completion(built).await;

    let trace = recorder.trace();
    let mut open: std::collections::HashMap<SignalName, bool> = std::collections::HashMap::new();
    for (_, name, phase) in trace {
        match phase {
            Phase::Before => {
                assert!(!open.get(&name).copied().unwrap_or(false), "{name:?} fired Before while already open");
                open.insert(name, true);
            }
            Phase::After => {
                assert!(open.get(&name).copied().unwrap_or(false), "{name:?} fired After without a matching Before");
                open.insert(name, false);
            }
            Phase::Successful => {}
        }
    }
    assert!(open.values().all(|still_open| !still_open), "every opened signal must also close");
}
