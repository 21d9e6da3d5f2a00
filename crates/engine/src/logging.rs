// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ErrorLogged`/`WarningLogged` diagnostic channels are driven off
//! ordinary `tracing::error!`/`tracing::warn!` calls anywhere in the
//! process, not just the ones the Runner issues directly — a device
//! adapter or instrument logging a warning on its own should still trip
//! the run-wide flag the final summary checks.

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::bus::SignalBus;

/// A `tracing_subscriber::Layer` that flips [`SignalBus`]'s diagnostic
/// flags on every `ERROR`/`WARN` event, regardless of which module or
/// task emitted it. Install alongside a formatting layer:
///
/// ```ignore
/// tracing_subscriber::registry()
///     .with(tracing_subscriber::fmt::layer())
///     .with(LogFlagLayer::new(bus.clone()))
///     .init();
/// ```
pub struct LogFlagLayer {
    bus: SignalBus,
}

impl LogFlagLayer {
    pub fn new(bus: SignalBus) -> Self {
        Self { bus }
    }
}

impl<S: Subscriber> Layer<S> for LogFlagLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        match *event.metadata().level() {
            Level::ERROR => self.bus.mark_error_logged(),
            Level::WARN => self.bus.mark_warning_logged(),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
