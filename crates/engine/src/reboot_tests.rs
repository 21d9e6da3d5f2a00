// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;
use std::sync::Arc;
use wa_adapters::device::fake::FakeDevice;
use wa_core::{Config, Device, ExecutionContext, FilesystemResolver};

fn ctx_with(device: FakeDevice) -> ExecutionContext {
    let device: Arc<dyn Device> = Arc::new(device);
    let config = Arc::new(Config::new(PathBuf::from("/tmp/wa-reboot-test"), "stub"));
    let resolver: Arc<dyn wa_core::ResourceResolver> = Arc::new(FilesystemResolver::new(vec![]));
    ExecutionContext::new(device, config, resolver)
}

#[tokio::test]
async fn initial_boot_no_op_when_policy_forbids_it() {
    let fake = FakeDevice::new("d1");
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();
    let policy = RebootPolicy::default();

    initial_boot(&bus, &mut ctx, &policy).await.unwrap();
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn initial_boot_soft_reboots_after_successful_connect() {
    let fake = FakeDevice::new("d1");
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();
    let policy = RebootPolicy { perform_initial_boot: true, ..Default::default() };

    initial_boot(&bus, &mut ctx, &policy).await.unwrap();
    assert!(fake.calls().contains(&wa_adapters::device::fake::DeviceCall::Connect));
    assert!(fake.calls().contains(&wa_adapters::device::fake::DeviceCall::Boot));
}

#[tokio::test]
async fn initial_boot_hard_boots_when_connect_fails_and_hard_reset_supported() {
    let fake = FakeDevice::new("d1").with_capability(wa_core::Capability::ResetPower);
    fake.fail_next_connects(1);
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();
    let policy = RebootPolicy { perform_initial_boot: true, ..Default::default() };

    initial_boot(&bus, &mut ctx, &policy).await.unwrap();
    assert!(fake.calls().contains(&wa_adapters::device::fake::DeviceCall::BootHard));
}

#[tokio::test]
async fn initial_boot_fails_when_connect_fails_and_no_hard_reset() {
    let fake = FakeDevice::new("d1");
    fake.fail_next_connects(1);
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();
    let policy = RebootPolicy { perform_initial_boot: true, ..Default::default() };

    let result = initial_boot(&bus, &mut ctx, &policy).await;
    assert!(matches!(result, Err(DeviceError::CannotRecoverInitialBoot)));
}

#[tokio::test]
async fn reboot_device_reconnects_on_first_success() {
    let fake = FakeDevice::new("d1");
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();

    reboot_device(&bus, &mut ctx, &ParameterMap::new(), false).await.unwrap();
    assert_eq!(
        fake.calls(),
        vec![wa_adapters::device::fake::DeviceCall::Boot, wa_adapters::device::fake::DeviceCall::Connect]
    );
}

#[tokio::test]
async fn reboot_device_retries_up_to_max_attempts_then_succeeds() {
    let fake = FakeDevice::new("d1");
    fake.fail_next_boots(MAX_REBOOT_ATTEMPTS - 1);
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();

    reboot_device(&bus, &mut ctx, &ParameterMap::new(), false).await.unwrap();
    let boots = fake.calls().iter().filter(|c| **c == wa_adapters::device::fake::DeviceCall::Boot).count();
    assert_eq!(boots as u32, MAX_REBOOT_ATTEMPTS);
}

#[tokio::test]
async fn reboot_device_exhausts_after_max_attempts() {
    let fake = FakeDevice::new("d1");
    fake.fail_next_boots(MAX_REBOOT_ATTEMPTS);
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();

    let result = reboot_device(&bus, &mut ctx, &ParameterMap::new(), false).await;
    assert!(matches!(result, Err(DeviceError::RebootExhausted)));
    let boots = fake.calls().iter().filter(|c| **c == wa_adapters::device::fake::DeviceCall::Boot).count();
    assert_eq!(boots as u32, MAX_REBOOT_ATTEMPTS);
}

#[tokio::test]
async fn reboot_device_hard_uses_boot_hard() {
    let fake = FakeDevice::new("d1");
    let mut ctx = ctx_with(fake.clone());
    let bus = SignalBus::new();

    reboot_device(&bus, &mut ctx, &ParameterMap::new(), true).await.unwrap();
    assert!(fake.calls().contains(&wa_adapters::device::fake::DeviceCall::BootHard));
}
