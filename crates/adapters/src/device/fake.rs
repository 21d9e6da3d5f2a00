// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake device adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use wa_core::{Capability, Device, DeviceError, DeviceInfo, ExecutionContext, ParameterMap};

/// Recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Connect,
    Disconnect,
    Initialize,
    Start,
    Stop,
    Boot,
    BootHard,
    Flash,
    SetRuntimeParameters(ParameterMap),
    CheckResponsive,
    CaptureScreen(PathBuf),
}

struct FakeDeviceState {
    calls: Vec<DeviceCall>,
    capabilities: HashSet<Capability>,
    responsive: bool,
    connect_failures_remaining: u32,
    boot_failures_remaining: u32,
    boot_hard_failures_remaining: u32,
}

/// Fake device adapter for testing. Records every call it receives and
/// lets a test script configure a run of failures on `connect`, `boot`
/// or `boot_hard` before the underlying operation starts succeeding
/// again — enough to exercise the Runner's reboot-recovery path without
/// real hardware.
#[derive(Clone)]
pub struct FakeDevice {
    target_name: String,
    inner: Arc<Mutex<FakeDeviceState>>,
}

impl FakeDevice {
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            inner: Arc::new(Mutex::new(FakeDeviceState {
                calls: Vec::new(),
                capabilities: HashSet::new(),
                responsive: true,
                connect_failures_remaining: 0,
                boot_failures_remaining: 0,
                boot_hard_failures_remaining: 0,
            })),
        }
    }

    pub fn with_capability(self, capability: Capability) -> Self {
        self.inner.lock().capabilities.insert(capability);
        self
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_responsive(&self, responsive: bool) {
        self.inner.lock().responsive = responsive;
    }

    /// The next `n` calls to `connect` fail with `DeviceError::Other`.
    pub fn fail_next_connects(&self, n: u32) {
        self.inner.lock().connect_failures_remaining = n;
    }

    /// The next `n` calls to `boot` fail with `DeviceError::Other`.
    pub fn fail_next_boots(&self, n: u32) {
        self.inner.lock().boot_failures_remaining = n;
    }

    /// The next `n` calls to `boot_hard` fail with `DeviceError::Other`.
    pub fn fail_next_hard_boots(&self, n: u32) {
        self.inner.lock().boot_hard_failures_remaining = n;
    }
}

#[async_trait]
impl Device for FakeDevice {
    async fn connect(&self) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DeviceCall::Connect);
        if inner.connect_failures_remaining > 0 {
            inner.connect_failures_remaining -= 1;
            return Err(DeviceError::Other("fake connect failure".into()));
        }
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), DeviceError> {
        self.inner.lock().calls.push(DeviceCall::Disconnect);
        Ok(())
    }

    async fn initialize(&self, _ctx: &mut ExecutionContext) -> Result<(), DeviceError> {
        self.inner.lock().calls.push(DeviceCall::Initialize);
        Ok(())
    }

    async fn start(&self) -> Result<(), DeviceError> {
        self.inner.lock().calls.push(DeviceCall::Start);
        Ok(())
    }

    async fn stop(&self) -> Result<(), DeviceError> {
        self.inner.lock().calls.push(DeviceCall::Stop);
        Ok(())
    }

    async fn boot(&self, _params: &ParameterMap) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DeviceCall::Boot);
        if inner.boot_failures_remaining > 0 {
            inner.boot_failures_remaining -= 1;
            return Err(DeviceError::Other("fake boot failure".into()));
        }
        Ok(())
    }

    async fn boot_hard(&self) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DeviceCall::BootHard);
        if inner.boot_hard_failures_remaining > 0 {
            inner.boot_hard_failures_remaining -= 1;
            return Err(DeviceError::Other("fake hard boot failure".into()));
        }
        Ok(())
    }

    async fn flash(&self, _params: &ParameterMap) -> Result<(), DeviceError> {
        self.inner.lock().calls.push(DeviceCall::Flash);
        Ok(())
    }

    fn can(&self, capability: Capability) -> bool {
        self.inner.lock().capabilities.contains(&capability)
    }

    async fn set_runtime_parameters(&self, params: &ParameterMap) -> Result<(), DeviceError> {
        self.inner
            .lock()
            .calls
            .push(DeviceCall::SetRuntimeParameters(params.clone()));
        Ok(())
    }

    async fn check_responsive(&self) -> Result<(), DeviceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(DeviceCall::CheckResponsive);
        if inner.responsive {
            Ok(())
        } else {
            Err(DeviceError::Timeout("fake device unresponsive".into()))
        }
    }

    async fn capture_screen(&self, path: &Path) -> Result<(), DeviceError> {
        self.inner
            .lock()
            .calls
            .push(DeviceCall::CaptureScreen(path.to_path_buf()));
        Ok(())
    }

    fn info(&self) -> DeviceInfo {
        DeviceInfo {
            name: self.target_name.clone(),
            os: "fake".to_string(),
            properties: json!({}),
        }
    }

    fn target_name(&self) -> &str {
        &self.target_name
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
