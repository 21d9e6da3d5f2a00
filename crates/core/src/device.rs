// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The device capability: the target the harness drives.

use crate::context::ExecutionContext;
use crate::error::DeviceError;
use crate::spec::ParameterMap;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Optional capabilities a device may or may not support. Checked by the
/// Runner before attempting a flash or a hard reset, rather than letting
/// the call fail and inferring intent from the error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Can be power-cycled (hard reset) without host-side recovery steps.
    ResetPower,
    /// Supports flashing images before boot.
    Flash,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DeviceInfo {
    pub name: String,
    pub os: String,
    pub properties: Value,
}

/// A device under test. All operations are async because real
/// implementations talk to hardware or a device-bridge process over a
/// connection that can legitimately stall.
#[async_trait]
pub trait Device: Send + Sync {
    async fn connect(&self) -> Result<(), DeviceError>;
    async fn disconnect(&self) -> Result<(), DeviceError>;

    /// One-time device-side initialization for the run (install agents,
    /// probe capabilities). Distinct from `boot`: this runs once, `boot`
    /// runs once per reboot.
    async fn initialize(&self, ctx: &mut ExecutionContext) -> Result<(), DeviceError>;

    async fn start(&self) -> Result<(), DeviceError>;
    async fn stop(&self) -> Result<(), DeviceError>;

    /// Soft boot with the given boot parameters applied.
    async fn boot(&self, params: &ParameterMap) -> Result<(), DeviceError>;

    /// Hard reset. Only called when `can(Capability::ResetPower)` and the
    /// reboot policy permits it.
    async fn boot_hard(&self) -> Result<(), DeviceError>;

    async fn flash(&self, params: &ParameterMap) -> Result<(), DeviceError>;

    fn can(&self, capability: Capability) -> bool;

    async fn set_runtime_parameters(&self, params: &ParameterMap) -> Result<(), DeviceError>;

    /// Liveness probe used to decide whether a failure needs a reboot.
    async fn check_responsive(&self) -> Result<(), DeviceError>;

    async fn capture_screen(&self, path: &Path) -> Result<(), DeviceError>;

    fn info(&self) -> DeviceInfo;

    fn target_name(&self) -> &str;
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
