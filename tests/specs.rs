// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specifications for the hq sorting agent.
//!
//! These drive real engines over temporary directories: events go in
//! through `push`, outcomes are observed on the filesystem, on the lock
//! table, and on fake dove channels.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/debounce.rs"]
mod debounce;
#[path = "specs/locks.rs"]
mod locks;
#[path = "specs/notify.rs"]
mod notify;
#[path = "specs/sorting.rs"]
mod sorting;
