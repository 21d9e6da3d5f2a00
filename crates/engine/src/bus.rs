// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The signal bus: synchronous named pub/sub, plus the `signal_wrap`
//! helper that gives every wrapped phase its guaranteed-`After` triple.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use wa_core::{ExecutionContext, Phase, Signal, SignalName};

pub type HandlerId = u64;
type Handler = dyn Fn(&ExecutionContext) -> Result<(), wa_core::WaError> + Send + Sync;

#[derive(Default)]
struct BusState {
    handlers: HashMap<Signal, Vec<(HandlerId, Arc<Handler>)>>,
}

/// A named event channel, shared by cheap clone between the Runner and
/// every observer it hands references to.
#[derive(Clone)]
pub struct SignalBus {
    state: Arc<Mutex<BusState>>,
    next_id: Arc<AtomicU64>,
    error_logged: Arc<AtomicBool>,
    warning_logged: Arc<AtomicBool>,
}

impl Default for SignalBus {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(BusState::default())),
            next_id: Arc::new(AtomicU64::new(1)),
            error_logged: Arc::new(AtomicBool::new(false)),
            warning_logged: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl SignalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `signal`, returning an id that can later be
    /// passed to `disconnect`.
    pub fn connect(
        &self,
        signal: Signal,
        handler: impl Fn(&ExecutionContext) -> Result<(), wa_core::WaError> + Send + Sync + 'static,
    ) -> HandlerId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.state
            .lock()
            .handlers
            .entry(signal)
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    pub fn disconnect(&self, signal: Signal, id: HandlerId) {
        if let Some(handlers) = self.state.lock().handlers.get_mut(&signal) {
            handlers.retain(|(existing, _)| *existing != id);
        }
    }

    /// Dispatch `signal` to every registered handler, in registration
    /// order. The subscriber list is snapshotted (cloned out from under
    /// the lock) before iterating, so a handler that calls `disconnect`
    /// on itself mid-dispatch cannot invalidate the current iteration.
    pub fn send(&self, signal: Signal, ctx: &ExecutionContext) {
        if matches!(signal, Signal::ErrorLogged) {
            self.error_logged.store(true, Ordering::SeqCst);
        }
        if matches!(signal, Signal::WarningLogged) {
            self.warning_logged.store(true, Ordering::SeqCst);
        }

        let snapshot: Vec<Arc<Handler>> = self
            .state
            .lock()
            .handlers
            .get(&signal)
            .map(|handlers| handlers.iter().map(|(_, handler)| handler.clone()).collect())
            .unwrap_or_default();

        for handler in snapshot {
            if let Err(err) = handler(ctx) {
                self.error_logged.store(true, Ordering::SeqCst);
                tracing::error!(signal = %signal, error = %err, "signal handler failed");
            }
        }
    }

    pub fn error_logged(&self) -> bool {
        self.error_logged.load(Ordering::SeqCst)
    }

    pub fn warning_logged(&self) -> bool {
        self.warning_logged.load(Ordering::SeqCst)
    }

    /// Flip the error-logged flag directly, with no `Signal`/`ExecutionContext`
    /// involved — the route [`crate::logging::LogFlagLayer`] uses, since a
    /// `tracing` event can fire from places that have no context to hand.
    pub fn mark_error_logged(&self) {
        self.error_logged.store(true, Ordering::SeqCst);
    }

    pub fn mark_warning_logged(&self) {
        self.warning_logged.store(true, Ordering::SeqCst);
    }
}

/// Emit `Before`, run `body`, emit `Successful` iff it returned `Ok`, then
/// unconditionally emit `After`. `body` gets exclusive access to `ctx`;
/// the bus only ever needs shared access, so the mutable borrow ends the
/// moment the body's future resolves and the sends on either side borrow
/// `ctx` immutably again.
pub async fn signal_wrap<T, E, F, Fut>(
    bus: &SignalBus,
    ctx: &mut ExecutionContext,
    name: SignalName,
    body: F,
) -> Result<T, E>
where
    F: FnOnce(&mut ExecutionContext) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    bus.send(Signal::Phased(name, Phase::Before), ctx);
    let result = body(ctx).await;
    if result.is_ok() {
        bus.send(Signal::Phased(name, Phase::Successful), ctx);
    }
    bus.send(Signal::Phased(name, Phase::After), ctx);
    result
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
