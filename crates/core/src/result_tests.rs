// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn iteration_result_starts_running_with_no_output() {
    let result = IterationResult::new();
    assert_eq!(result.status, Status::Running);
    assert!(result.metrics.is_empty());
    assert!(result.output_directory.is_none());
}

#[test]
fn status_histogram_counts_only_observed_statuses_in_canonical_order() {
    let mut run = RunResult::new(RunInfo::new());
    let mut ok = IterationResult::new();
    ok.status = Status::Ok;
    let mut failed = IterationResult::new();
    failed.status = Status::Failed;
    let mut ok2 = IterationResult::new();
    ok2.status = Status::Ok;
    run.iteration_results = vec![ok, failed, ok2];

    let histogram = run.status_histogram();
    assert_eq!(histogram, vec![(Status::Ok, 2), (Status::Failed, 1)]);
}

#[test]
fn metric_builder_sets_optional_fields() {
    let metric = Metric::new("fps", 59.9).with_units("fps").lower_is_better(false);
    assert_eq!(metric.units.as_deref(), Some("fps"));
    assert!(!metric.lower_is_better);
}
