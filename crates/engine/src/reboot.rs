// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reboot policy execution: the mandatory initial boot at run start, and
//! the bounded-retry soft/hard reboot invoked from inside the job loop
//! when a spec or iteration boundary calls for one.

use wa_core::{Capability, DeviceError, ExecutionContext, ParameterMap, RebootPolicy, SignalName};

use crate::bus::{signal_wrap, SignalBus};

/// Number of reboot attempts `reboot_device` makes before giving up.
pub const MAX_REBOOT_ATTEMPTS: u32 = 3;

/// Run the mandatory initial boot, if `policy.perform_initial_boot`.
///
/// Attempts `device.connect()` first. If it fails and the device
/// supports a hard reset, a hard boot is attempted inside the
/// `InitialBoot` signal wrap; if it fails and the device has no hard
/// reset, the failure is returned as-is (there is no way to recover).
/// If the connect succeeded, a soft reboot is still issued inside the
/// wrap — the original connect only proves the device is reachable, not
/// that it is in a known-clean boot state.
pub async fn initial_boot(
    bus: &SignalBus,
    ctx: &mut ExecutionContext,
    policy: &RebootPolicy,
) -> Result<(), DeviceError> {
    if !policy.perform_initial_boot {
        return Ok(());
    }

    let connect_ok = ctx.device_manager.connect().await.is_ok();

    if !connect_ok && !ctx.device_manager.can(Capability::ResetPower) {
        return Err(DeviceError::CannotRecoverInitialBoot);
    }

    signal_wrap(bus, ctx, SignalName::InitialBoot, |ctx| {
        let device = ctx.device_manager.clone();
        async move {
            if connect_ok {
                device.boot(&ParameterMap::new()).await
            } else {
                device.boot_hard().await
            }
        }
    })
    .await
}

/// Attempt up to [`MAX_REBOOT_ATTEMPTS`] reboots, signal-wrapped with
/// `Boot`. `hard` selects `boot_hard` (the device-failure recovery path)
/// over the ordinary `boot(boot_parameters)` used at spec/iteration
/// boundaries. On the first successful boot, reconnects and returns;
/// if every attempt fails, returns [`DeviceError::RebootExhausted`].
pub async fn reboot_device(
    bus: &SignalBus,
    ctx: &mut ExecutionContext,
    boot_parameters: &ParameterMap,
    hard: bool,
) -> Result<(), DeviceError> {
    let boot_parameters = boot_parameters.clone();
    signal_wrap(bus, ctx, SignalName::Boot, |ctx| {
        let device = ctx.device_manager.clone();
        async move {
            for attempt in 1..=MAX_REBOOT_ATTEMPTS {
                let outcome = if hard { device.boot_hard().await } else { device.boot(&boot_parameters).await };
                match outcome {
                    Ok(()) => return device.connect().await,
                    Err(err) => {
                        tracing::warn!(attempt, max = MAX_REBOOT_ATTEMPTS, error = %err, "reboot attempt failed");
                    }
                }
            }
            Err(DeviceError::RebootExhausted)
        }
    })
    .await
}

#[cfg(test)]
#[path = "reboot_tests.rs"]
mod tests;
