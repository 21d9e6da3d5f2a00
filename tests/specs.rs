//! End-to-end specs for the execution core, driven through
//! `wa_engine::Executor` the way a CLI front door would use it.
//!
//! These complement the per-crate unit tests (one Runner method, one
//! Scheduler policy, one bus dispatch at a time) with whole-run
//! assertions that only make sense once `ExecutorInputs` has been fully
//! assembled and wired to a real `SignalBus`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/lifecycle.rs"]
mod lifecycle;
#[path = "specs/recovery.rs"]
mod recovery;
#[path = "specs/retry.rs"]
mod retry;
