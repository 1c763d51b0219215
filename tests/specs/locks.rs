// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure-cleanup scenarios around named locks.

use crate::prelude::*;

#[tokio::test(flavor = "multi_thread")]
async fn failure_chain_frees_locks_after_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/x.txt"), b"x");

    let agent = agent(&format!(
        r#"
pipelines:
  - name: crashy
    input: {base}/in
    glob: "*.txt"
    process:
      - {{type: lock_acquire, arg: x}}
      - {{type: error}}
    failure:
      - {{type: lock_release}}
"#
    ));
    agent.push(modified(dir.path().join("in/x.txt")));
    assert!(agent.drain(DRAIN).await);
    assert!(!agent.services().locks.is_held("x"));
}

#[tokio::test(flavor = "multi_thread")]
async fn named_locks_serialize_concurrent_events() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/a.txt"), b"a");
    write_file(&dir.path().join("in/b.txt"), b"b");

    // Both events funnel through one lock; each appends its source name
    // to the same log file via `execute`. Serialization means both
    // handlers completed without interleaving failures.
    let marker = dir.path().join("order.log");
    let agent = agent(&format!(
        r#"
pipelines:
  - name: serialized
    input: {base}/in
    glob: "*.txt"
    process:
      - {{type: lock_acquire, arg: shared}}
      - {{type: parse_filename}}
      - {{type: execute, arg: ["cp", "{{source}}", "{marker}.{{stem}}"]}}
      - {{type: lock_release}}
"#,
        marker = marker.display()
    ));
    agent.push(modified(dir.path().join("in/a.txt")));
    agent.push(modified(dir.path().join("in/b.txt")));
    assert!(agent.drain(DRAIN).await);

    assert!(dir.path().join("order.log.a").exists());
    assert!(dir.path().join("order.log.b").exists());
    assert!(!agent.services().locks.is_held("shared"));
}

#[tokio::test(flavor = "multi_thread")]
async fn locks_without_release_stay_held_for_the_process() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/x.txt"), b"x");

    let agent = agent(&format!(
        r#"
pipelines:
  - name: keeper
    input: {base}/in
    glob: "*.txt"
    process:
      - {{type: lock_acquire, arg: keep}}
"#
    ));
    agent.push(modified(dir.path().join("in/x.txt")));
    assert!(agent.drain(DRAIN).await);

    // Releasing is the configuration author's responsibility.
    assert!(agent.services().locks.is_held("keep"));
}
