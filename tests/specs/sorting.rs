// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classify-and-move scenarios.

use crate::prelude::*;

#[tokio::test(flavor = "multi_thread")]
async fn classify_and_move_relocates_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/a/b/c.txt"), b"payload");

    let agent = agent(&format!(
        r#"
pipelines:
  - name: texts
    input: {base}/in
    re: '.*\.txt$'
    process:
      - {{type: parse_filename}}
      - {{type: move, arg: "{base}/out/{{stem}}-{{suffix}}"}}
"#
    ));
    agent.push(modified(dir.path().join("in/a/b/c.txt")));
    assert!(agent.drain(DRAIN).await);

    assert!(dir.path().join("out/c-.txt").exists());
    assert!(!dir.path().join("in/a/b/c.txt").exists());
    assert_eq!(
        std::fs::read(dir.path().join("out/c-.txt")).unwrap(),
        b"payload"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn blacklisted_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/x.tmp"), b"scratch");

    let agent = agent(&format!(
        r#"
pipelines:
  - name: texts
    input: {base}/in
    re: '.*'
    blacklist: ["*.tmp"]
    process:
      - {{type: parse_filename}}
      - {{type: move, arg: "{base}/out/{{filename}}"}}
"#
    ));
    agent.push(modified(dir.path().join("in/x.tmp")));
    assert!(agent.drain(DRAIN).await);

    // No processor ran: the file stays put and no output tree appears.
    assert!(dir.path().join("in/x.tmp").exists());
    assert!(!dir.path().join("out").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn first_matching_pipeline_wins() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/app.log"), b"lines");

    let agent = agent(&format!(
        r#"
pipelines:
  - name: first
    input: {base}/in
    glob: "*.log"
    process:
      - {{type: parse_filename}}
      - {{type: move, arg: "{base}/first/{{filename}}"}}
  - name: second
    input: {base}/in
    glob: "*.log"
    process:
      - {{type: parse_filename}}
      - {{type: move, arg: "{base}/second/{{filename}}"}}
"#
    ));
    agent.push(modified(dir.path().join("in/app.log")));
    assert!(agent.drain(DRAIN).await);

    assert!(dir.path().join("first/app.log").exists());
    assert!(!dir.path().join("second").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn directories_flow_to_the_next_pipeline_when_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    std::fs::create_dir_all(dir.path().join("in/season-1")).unwrap();

    let agent = agent(&format!(
        r#"
pipelines:
  - name: files-only
    input: {base}/in
    glob: "**"
    process:
      - {{type: skip_directory}}
      - {{type: lock_acquire, arg: files}}
  - name: directories
    input: {base}/in
    glob: "**"
    process:
      - {{type: lock_acquire, arg: dirs}}
"#
    ));
    agent.push(hq_core::FsEvent::new(
        dir.path().join("in/season-1"),
        hq_core::FsEventKind::Modified,
        true,
    ));
    assert!(agent.drain(DRAIN).await);

    let locks = &agent.services().locks;
    assert!(!locks.is_held("files"));
    assert!(locks.is_held("dirs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn initialize_events_from_a_scan_are_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/old.txt"), b"from before startup");

    let agent = agent(&format!(
        r#"
pipelines:
  - name: texts
    input: {base}/in
    re: '.*\.txt$'
    process:
      - {{type: skip_directory}}
      - {{type: parse_filename}}
      - {{type: move, arg: "{base}/out/{{filename}}"}}
"#
    ));
    for event in hq_adapters::initial_scan(&[dir.path().join("in")]) {
        agent.push(event);
    }
    assert!(agent.drain(DRAIN).await);
    assert!(dir.path().join("out/old.txt").exists());
}
