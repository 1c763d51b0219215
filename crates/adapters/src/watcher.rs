// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem watcher and initial scan.
//!
//! OS events are translated to [`FsEvent`]s on the notify callback thread
//! and forwarded into the async world over an mpsc channel. Dropping the
//! returned handle stops the watcher (and thereby closes the channel).

use hq_core::{FsEvent, FsEventKind};
use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("failed to initialize watcher: {0}")]
    Init(#[from] notify::Error),

    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

/// Keeps the underlying watcher alive; drop to stop watching.
pub struct WatchHandle {
    _watcher: RecommendedWatcher,
}

/// Start watching the given roots recursively, sending translated events
/// into `tx`.
pub fn spawn_watcher(
    roots: &[PathBuf],
    tx: mpsc::Sender<FsEvent>,
) -> Result<WatchHandle, WatchError> {
    let mut watcher =
        notify::recommended_watcher(move |result: Result<notify::Event, notify::Error>| {
            match result {
                Ok(event) => {
                    for fs_event in translate(&event) {
                        // Receiver gone means the host is shutting down.
                        if tx.blocking_send(fs_event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "watch error"),
            }
        })?;

    for root in roots {
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|source| WatchError::Watch {
                path: root.clone(),
                source,
            })?;
        tracing::info!(root = %root.display(), "watching");
    }

    Ok(WatchHandle { _watcher: watcher })
}

/// Map a notify event onto our event shape. Creations and content or
/// metadata changes are `Modified`; renames are `Moved`; removals carry
/// no work for a sorting pipeline and are dropped.
pub(crate) fn translate(event: &notify::Event) -> Vec<FsEvent> {
    let kind = match event.kind {
        EventKind::Create(_) => FsEventKind::Modified,
        EventKind::Modify(ModifyKind::Name(_)) => FsEventKind::Moved,
        EventKind::Modify(_) => FsEventKind::Modified,
        _ => return Vec::new(),
    };
    event
        .paths
        .iter()
        .map(|path| FsEvent::new(path.clone(), kind, path.is_dir()))
        .collect()
}

/// Recursively scan the given roots, synthesizing one `Initialize` event
/// per file and per directory. Issued once at startup, before the live
/// event loop. Unreadable entries are logged and skipped.
pub fn initial_scan(roots: &[PathBuf]) -> Vec<FsEvent> {
    let mut events = Vec::new();
    for root in roots {
        scan_dir(root, &mut events);
    }
    events
}

fn scan_dir(dir: &Path, events: &mut Vec<FsEvent>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable directory");
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        let is_dir = path.is_dir();
        events.push(FsEvent::new(path.clone(), FsEventKind::Initialize, is_dir));
        if is_dir {
            scan_dir(&path, events);
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
