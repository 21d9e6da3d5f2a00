// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod device;
#[cfg(feature = "test-support")]
pub mod instrument;
pub mod result_processor;
pub mod workload;

pub use device::TracedDevice;
#[cfg(feature = "test-support")]
pub use device::FakeDevice;
#[cfg(feature = "test-support")]
pub use instrument::RecordingInstrument;
pub use result_processor::JsonLinesProcessor;
#[cfg(feature = "test-support")]
pub use workload::FakeWorkload;
