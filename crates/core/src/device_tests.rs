// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn capability_equality() {
    assert_eq!(Capability::Flash, Capability::Flash);
    assert_ne!(Capability::Flash, Capability::ResetPower);
}

#[test]
fn device_info_defaults_to_empty() {
    let info = DeviceInfo::default();
    assert!(info.name.is_empty());
    assert!(info.os.is_empty());
    assert!(info.properties.is_null());
}
