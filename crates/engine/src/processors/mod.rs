// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The processor registry.
//!
//! A processor is a named unit of work over an event context:
//! `(services, context, arg) -> future of Result`. Synchronous work just
//! returns an already-completed future, so the engine awaits every step
//! uniformly. The table is fixed at compile time; configuration may only
//! reference what is registered here.

mod digest;
mod exec;
mod fs;
mod lock;
mod misc;
mod notify;

pub(crate) use fs::resolve_path;

use crate::error::ProcessError;
use crate::locks::LockManager;
use hq_adapters::DoveRegistry;
use hq_core::{Arg, Context};
use std::future::Future;
use std::pin::Pin;

/// Shared services a processor may call into.
#[derive(Clone, Default)]
pub struct Services {
    pub locks: LockManager,
    pub doves: DoveRegistry,
}

pub type ProcFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ProcessError>> + Send + 'a>>;

/// The uniform processor contract.
pub type ProcessorFn = for<'a> fn(&'a Services, &'a mut Context, &'a Arg) -> ProcFuture<'a>;

pub struct ProcessorEntry {
    pub name: &'static str,
    pub summary: &'static str,
    pub run: ProcessorFn,
}

/// The name → processor table.
pub struct Registry {
    entries: Vec<ProcessorEntry>,
}

impl Registry {
    /// The full built-in processor set.
    pub fn standard() -> Self {
        let entries = vec![
            ProcessorEntry {
                name: "delay",
                summary: "suspend for the given number of seconds",
                run: misc::delay,
            },
            ProcessorEntry {
                name: "chown_to_parent",
                summary: "give source the owner of its parent directory",
                run: fs::chown_to_parent,
            },
            ProcessorEntry {
                name: "mkpath",
                summary: "create the expanded path, inheriting ownership per level",
                run: fs::mkpath,
            },
            ProcessorEntry {
                name: "move",
                summary: "rename source to the expanded destination",
                run: fs::move_source,
            },
            ProcessorEntry {
                name: "parse_filename",
                summary: "derive filename, parent, suffix, and stem from source",
                run: fs::parse_filename,
            },
            ProcessorEntry {
                name: "digest",
                summary: "hash source with md5, sha1, or sha256",
                run: digest::digest,
            },
            ProcessorEntry {
                name: "generate_uuid",
                summary: "put a random short identifier of the given length into uuid",
                run: misc::generate_uuid,
            },
            ProcessorEntry {
                name: "get_datetime",
                summary: "format the event timestamp into datetime",
                run: misc::get_datetime,
            },
            ProcessorEntry {
                name: "copy_field",
                summary: "copy one context field onto another",
                run: misc::copy_field,
            },
            ProcessorEntry {
                name: "debug_info",
                summary: "log the whole context",
                run: misc::debug_info,
            },
            ProcessorEntry {
                name: "skip_directory",
                summary: "abort the chain for directory events",
                run: misc::skip_directory,
            },
            ProcessorEntry {
                name: "failure",
                summary: "abort the chain unconditionally",
                run: misc::failure,
            },
            ProcessorEntry {
                name: "error",
                summary: "raise a processor error (exercises the failure chain)",
                run: misc::error,
            },
            ProcessorEntry {
                name: "lock_acquire",
                summary: "take the named locks, all in one atomic step",
                run: lock::lock_acquire,
            },
            ProcessorEntry {
                name: "lock_release",
                summary: "release the named locks, or everything held",
                run: lock::lock_release,
            },
            ProcessorEntry {
                name: "execute",
                summary: "run an argv vector and gate the chain on its exit status",
                run: exec::execute,
            },
            ProcessorEntry {
                name: "publish",
                summary: "send a message through a dove server",
                run: notify::publish,
            },
        ];
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ProcessorEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ProcessorEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
