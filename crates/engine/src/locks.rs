// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named asynchronous locks with all-or-nothing multi-acquire.
//!
//! Lock names are case-insensitive. A single meta-mutex guards both the
//! name table and the acquire protocol: a request try-acquires every
//! requested lock inside one critical section and, if any is busy, drops
//! the partial acquisitions before anyone else could observe them and
//! retries after a short suspension. Two contexts requesting overlapping
//! sets therefore cannot deadlock. Fairness is not attempted; a starved
//! waiter keeps retrying.

use hq_core::Context;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// How long an acquire waits between retry rounds.
const RETRY_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Default)]
struct LockTable {
    locks: HashMap<String, Arc<AsyncMutex<()>>>,
    held: HashMap<String, OwnedMutexGuard<()>>,
}

/// One engine's lock namespace. Entries are created on first acquire and
/// live for the lifetime of the manager.
#[derive(Clone, Default)]
pub struct LockManager {
    table: Arc<Mutex<LockTable>>,
}

impl LockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire every named lock, atomically. Names are lowercased and
    /// deduplicated; the call returns only once all of them were free in
    /// the same moment. Acquired names are recorded in `ctx.locks`.
    pub async fn acquire(&self, ctx: &mut Context, names: &[String]) {
        let names = normalize(names);
        if names.is_empty() {
            return;
        }
        loop {
            {
                let mut table = self.table.lock();
                let handles: Vec<(String, Arc<AsyncMutex<()>>)> = names
                    .iter()
                    .map(|name| {
                        let lock = table.locks.entry(name.clone()).or_default();
                        (name.clone(), Arc::clone(lock))
                    })
                    .collect();

                let mut guards = Vec::with_capacity(handles.len());
                let mut all_free = true;
                for (name, lock) in handles {
                    match lock.try_lock_owned() {
                        Ok(guard) => guards.push((name, guard)),
                        Err(_) => {
                            all_free = false;
                            break;
                        }
                    }
                }

                if all_free {
                    for (name, guard) in guards {
                        tracing::debug!(lock = %name, "acquired");
                        ctx.add_lock(name.clone());
                        table.held.insert(name, guard);
                    }
                    return;
                }
                // Partial guards drop here, inside the critical section,
                // so no other acquirer ever saw them taken.
            }
            tokio::time::sleep(RETRY_INTERVAL).await;
        }
    }

    /// Release the named locks, or everything the context holds when
    /// `names` is `None`. Releasing a lock that is not held is logged
    /// and skipped.
    pub fn release(&self, ctx: &mut Context, names: Option<&[String]>) {
        let names = match names {
            Some(names) => normalize(names),
            None => ctx.locks().iter().cloned().collect(),
        };
        let mut table = self.table.lock();
        for name in names {
            if table.held.remove(&name).is_none() {
                tracing::warn!(lock = %name, "released lock was not held, skipping");
            } else {
                tracing::debug!(lock = %name, "released");
            }
            ctx.remove_lock(&name);
        }
    }

    /// Whether the named lock is currently held by any context.
    pub fn is_held(&self, name: &str) -> bool {
        self.table.lock().held.contains_key(&name.to_lowercase())
    }
}

/// Lowercase and deduplicate, keeping first-occurrence order.
fn normalize(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.to_lowercase();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
