// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the behavioral specs.

#![allow(dead_code)]

use hq_adapters::{DoveRegistry, Dovecote, FakeDove};
use hq_config::SortingConfig;
use hq_core::{FsEvent, FsEventKind};
use hq_engine::SortingAgent;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DRAIN: Duration = Duration::from_secs(10);

/// A sorting agent over a temp directory, with no dove servers.
pub fn agent(yaml: &str) -> SortingAgent {
    agent_with_doves(yaml, DoveRegistry::default())
}

pub fn agent_with_doves(yaml: &str, doves: DoveRegistry) -> SortingAgent {
    SortingAgent::new("spec", &SortingConfig::parse(yaml).unwrap(), doves)
        .unwrap()
        .with_debounce(Duration::ZERO)
}

/// One dove server `s1` with a single fake channel `c1`.
pub fn fake_dove_registry() -> (DoveRegistry, FakeDove) {
    let fake = FakeDove::new();
    let mut cote = Dovecote::new("s1");
    cote.insert("c1", Box::new(fake.clone()));
    (
        DoveRegistry::new(HashMap::from([("s1".to_string(), cote)])),
        fake,
    )
}

pub fn modified(path: impl Into<PathBuf>) -> FsEvent {
    FsEvent::new(path.into(), FsEventKind::Modified, false)
}

pub fn write_file(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}
