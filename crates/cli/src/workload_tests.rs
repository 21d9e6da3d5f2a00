// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use wa_core::{Config, Device, ExecutionContext, FilesystemResolver, ResourceResolver};

fn ctx() -> ExecutionContext {
    let device: Arc<dyn Device> = Arc::new(wa_adapters::device::fake::FakeDevice::new("d1"));
    let resolver: Arc<dyn ResourceResolver> = Arc::new(FilesystemResolver::new(vec![]));
    let config = Arc::new(Config::new(std::env::temp_dir().join("wa-shell-workload-test"), "fake"));
    ExecutionContext::new(device, config, resolver)
}

#[tokio::test]
async fn successful_command_records_duration_metric() {
    let workload = ShellWorkload::new("true".to_string(), vec![]);
    let mut context = ctx();

    workload.run(&mut context).await.unwrap();

    assert_eq!(context.run_result.metrics.len(), 1);
    assert_eq!(context.run_result.metrics[0].name, "duration_ms");
}

#[tokio::test]
async fn failing_command_returns_error() {
    let workload = ShellWorkload::new("false".to_string(), vec![]);
    let mut context = ctx();

    let result = workload.run(&mut context).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn missing_command_returns_error() {
    let workload = ShellWorkload::new("wa-cli-nonexistent-command-xyz".to_string(), vec![]);
    let mut context = ctx();

    let result = workload.run(&mut context).await;

    assert!(result.is_err());
}
