// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing wrapper for device adapters.

use async_trait::async_trait;
use std::path::Path;
use tracing::Instrument;
use wa_core::{Capability, Device, DeviceError, DeviceInfo, ExecutionContext, ParameterMap};

/// Wraps any `Device` with an `info_span` around every call, so a real
/// backend gets the same observability regardless of what it talks to.
#[derive(Clone)]
pub struct TracedDevice<D> {
    inner: D,
}

impl<D> TracedDevice<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: Device> Device for TracedDevice<D> {
    async fn connect(&self) -> Result<(), DeviceError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.connect().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "connected"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "connect failed"),
            }
            result
        }
        .instrument(tracing::info_span!("device.connect", target = self.inner.target_name()))
        .await
    }

    async fn disconnect(&self) -> Result<(), DeviceError> {
        let result = self.inner.disconnect().await;
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "disconnect failed (may be expected)");
        }
        result
    }

    async fn initialize(&self, ctx: &mut ExecutionContext) -> Result<(), DeviceError> {
        let result = self.inner.initialize(ctx).await;
        if let Err(ref e) = result {
            tracing::error!(error = %e, "device initialization failed");
        }
        result
    }

    async fn start(&self) -> Result<(), DeviceError> {
        self.inner.start().await
    }

    async fn stop(&self) -> Result<(), DeviceError> {
        self.inner.stop().await
    }

    async fn boot(&self, params: &ParameterMap) -> Result<(), DeviceError> {
        let span = tracing::info_span!("device.boot", target = self.inner.target_name());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.boot(params).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "booted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "boot failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn boot_hard(&self) -> Result<(), DeviceError> {
        let span = tracing::info_span!("device.boot_hard", target = self.inner.target_name());
        async {
            let start = std::time::Instant::now();
            let result = self.inner.boot_hard().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "hard booted"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "hard boot failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn flash(&self, params: &ParameterMap) -> Result<(), DeviceError> {
        let span = tracing::info_span!("device.flash", target = self.inner.target_name());
        async {
            tracing::info!("flashing");
            let start = std::time::Instant::now();
            let result = self.inner.flash(params).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "flashed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "flash failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn can(&self, capability: Capability) -> bool {
        self.inner.can(capability)
    }

    async fn set_runtime_parameters(&self, params: &ParameterMap) -> Result<(), DeviceError> {
        let result = self.inner.set_runtime_parameters(params).await;
        if let Err(ref e) = result {
            tracing::error!(error = %e, "setting runtime parameters failed");
        }
        result
    }

    async fn check_responsive(&self) -> Result<(), DeviceError> {
        let result = self.inner.check_responsive().await;
        tracing::trace!(responsive = result.is_ok(), "checked responsiveness");
        result
    }

    async fn capture_screen(&self, path: &Path) -> Result<(), DeviceError> {
        let result = self.inner.capture_screen(path).await;
        if let Err(ref e) = result {
            tracing::warn!(error = %e, path = %path.display(), "screenshot capture failed");
        }
        result
    }

    fn info(&self) -> DeviceInfo {
        self.inner.info()
    }

    fn target_name(&self) -> &str {
        self.inner.target_name()
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
