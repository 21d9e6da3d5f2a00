//! Device-recovery specs: the mandatory initial boot and the
//! unresponsive-device hard-reset path, exercised through the whole
//! `Executor::run` loop rather than calling `reboot::initial_boot` or
//! `Runner::run` directly.

use crate::prelude::*;
use wa_adapters::device::fake::DeviceCall;
use wa_core::Capability;

#[tokio::test]
async fn initial_boot_soft_reboots_a_reachable_device_before_the_first_job() {
    let device = FakeDevice::new("d1");
    let s = spec("s1", "spec-one", FakeWorkload::new("wl"), 1);

    let mut cfg = config("initial-boot");
    cfg.reboot_policy.perform_initial_boot = true;

    let built = inputs(device.clone(), cfg, vec![s]);
    run_to_completion(built).await;

    let calls = device.calls();
    assert!(calls.contains(&DeviceCall::Connect));
    assert!(calls.contains(&DeviceCall::Boot));
    assert!(!calls.contains(&DeviceCall::BootHard), "a reachable device must not be hard-reset");
}

#[tokio::test]
async fn unreachable_device_with_reset_power_recovers_via_hard_boot() {
    let device = FakeDevice::new("d1").with_capability(Capability::ResetPower);
    device.fail_next_connects(1);
    let s = spec("s1", "spec-one", FakeWorkload::new("wl"), 1);

    let mut cfg = config("hard-boot-recovery");
    cfg.reboot_policy.perform_initial_boot = true;

    let built = inputs(device.clone(), cfg, vec![s]);
    let ctx = run_to_completion(built).await;

    assert!(device.calls().contains(&DeviceCall::BootHard));
    assert_eq!(ctx.run_result.iteration_results.len(), 1);
    assert_eq!(ctx.run_result.iteration_results[0].status, Status::Ok);
}

#[tokio::test]
async fn unresponsive_device_mid_run_drains_the_rest_of_the_spec_as_skipped() {
    let device = FakeDevice::new("d1");
    let workload = FakeWorkload::new("wl");
    workload.fail_run("crashed");
    device.set_responsive(false);
    let s = spec("s1", "spec-one", workload, 3);

    let built = inputs(device, config("unresponsive"), vec![s]);
    let ctx = run_to_completion(built).await;

    let statuses: Vec<Status> = ctx.run_result.iteration_results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Status::Failed, Status::Skipped, Status::Skipped]);
}
