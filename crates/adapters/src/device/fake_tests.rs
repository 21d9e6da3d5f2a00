// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn records_calls_in_order() {
    let device = FakeDevice::new("stub");
    device.connect().await.unwrap();
    device.start().await.unwrap();
    device.stop().await.unwrap();
    device.disconnect().await.unwrap();

    assert_eq!(
        device.calls(),
        vec![
            DeviceCall::Connect,
            DeviceCall::Start,
            DeviceCall::Stop,
            DeviceCall::Disconnect,
        ]
    );
}

#[tokio::test]
async fn fails_the_configured_number_of_boots_then_recovers() {
    let device = FakeDevice::new("stub");
    device.fail_next_boots(2);
    let params = ParameterMap::new();

    assert!(device.boot(&params).await.is_err());
    assert!(device.boot(&params).await.is_err());
    assert!(device.boot(&params).await.is_ok());
}

#[tokio::test]
async fn check_responsive_reflects_configured_state() {
    let device = FakeDevice::new("stub");
    assert!(device.check_responsive().await.is_ok());

    device.set_responsive(false);
    assert!(device.check_responsive().await.is_err());
}

#[tokio::test]
async fn capability_reporting_matches_what_was_configured() {
    let device = FakeDevice::new("stub").with_capability(Capability::ResetPower);
    assert!(device.can(Capability::ResetPower));
    assert!(!device.can(Capability::Flash));
}
