// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O: filesystem watching, notification
//! channels, and subprocess execution.

pub mod dove;
pub mod subprocess;
pub mod watcher;

pub use dove::{Dove, DoveRegistry, Dovecote, Message, NotifyError};
pub use subprocess::{run_argv, ExecOutcome};
pub use watcher::{initial_scan, spawn_watcher, WatchError, WatchHandle};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use dove::FakeDove;
