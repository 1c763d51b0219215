// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const MANDATORY: &[&str] = &[
    "delay",
    "chown_to_parent",
    "mkpath",
    "move",
    "parse_filename",
    "digest",
    "generate_uuid",
    "get_datetime",
    "copy_field",
    "debug_info",
    "skip_directory",
    "failure",
    "error",
    "lock_acquire",
    "lock_release",
    "execute",
    "publish",
];

#[test]
fn every_mandatory_processor_is_registered() {
    let registry = Registry::standard();
    for name in MANDATORY {
        assert!(registry.contains(name), "missing processor: {name}");
    }
}

#[test]
fn registry_has_no_extra_entries() {
    let registry = Registry::standard();
    assert_eq!(registry.entries().count(), MANDATORY.len());
}

#[test]
fn unknown_names_resolve_to_none() {
    assert!(Registry::standard().get("teleport").is_none());
}

#[test]
fn every_entry_has_a_summary() {
    for entry in Registry::standard().entries() {
        assert!(!entry.summary.is_empty(), "{} has no summary", entry.name);
    }
}
