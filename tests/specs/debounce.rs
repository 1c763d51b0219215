// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debounce scenarios.

use crate::prelude::*;
use hq_config::SortingConfig;
use hq_engine::SortingAgent;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread")]
async fn a_burst_on_one_source_runs_one_handler() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/x.txt"), b"x");

    let yaml = format!(
        "pipelines:\n  - {{name: p, input: {base}/in, glob: '**', process: [{{type: debug_info}}]}}\n"
    );
    let agent = SortingAgent::new(
        "spec",
        &SortingConfig::parse(&yaml).unwrap(),
        hq_adapters::DoveRegistry::default(),
    )
    .unwrap()
    .with_debounce(Duration::from_millis(300));

    // Three events inside the debounce window of the first.
    for _ in 0..3 {
        agent.push(modified(dir.path().join("in/x.txt")));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(agent.in_flight_len(), 1);
    assert!(agent.drain(DRAIN).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn a_source_can_be_handled_again_after_its_handler_finished() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/x.txt"), b"x");

    let agent = agent(&format!(
        "pipelines:\n  - {{name: p, input: {base}/in, glob: '**', process: [{{type: debug_info}}]}}\n"
    ));
    agent.push(modified(dir.path().join("in/x.txt")));
    assert!(agent.drain(DRAIN).await);

    agent.push(modified(dir.path().join("in/x.txt")));
    assert_eq!(agent.in_flight_len(), 1);
    assert!(agent.drain(DRAIN).await);
}
