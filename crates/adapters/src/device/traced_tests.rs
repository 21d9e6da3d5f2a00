// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::device::fake::FakeDevice;

#[tokio::test]
async fn delegates_every_call_to_the_inner_device() {
    let inner = FakeDevice::new("stub");
    let traced = TracedDevice::new(inner.clone());

    assert_eq!(traced.target_name(), "stub");
    traced.connect().await.unwrap();
    traced.start().await.unwrap();
    traced.stop().await.unwrap();
    traced.disconnect().await.unwrap();

    assert_eq!(inner.calls().len(), 4);
}

#[tokio::test]
async fn surfaces_inner_errors_unchanged() {
    let inner = FakeDevice::new("stub");
    inner.set_responsive(false);
    let traced = TracedDevice::new(inner);

    assert!(traced.check_responsive().await.is_err());
}
