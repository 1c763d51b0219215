// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hash-and-report scenarios.

use crate::prelude::*;

const ZEROS_SHA256: &str = "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925";

#[tokio::test(flavor = "multi_thread")]
async fn hash_and_report_publishes_the_digest() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/zeros.bin"), &[0u8; 32]);

    let (doves, fake) = fake_dove_registry();
    let agent = agent_with_doves(
        &format!(
            r#"
pipelines:
  - name: hasher
    input: {base}/in
    glob: "*.bin"
    process:
      - {{type: digest, arg: sha256}}
      - {{type: publish, arg: {{server: s1, title: done, msg: "{{sha256}}"}}}}
"#
        ),
        doves,
    );
    agent.push(modified(dir.path().join("in/zeros.bin")));
    assert!(agent.drain(DRAIN).await);

    let published = fake.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].title.as_deref(), Some("done"));
    assert_eq!(published[0].msg, ZEROS_SHA256);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_publish_aborts_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/zeros.bin"), &[0u8; 32]);

    // No dove server registered: publish fails, so the move after it
    // must never run.
    let agent = agent(&format!(
        r#"
pipelines:
  - name: report-first
    input: {base}/in
    glob: "*.bin"
    process:
      - {{type: digest, arg: sha256}}
      - {{type: publish, arg: {{server: s1, msg: "{{sha256}}"}}}}
      - {{type: parse_filename}}
      - {{type: move, arg: "{base}/out/{{filename}}"}}
"#
    ));
    agent.push(modified(dir.path().join("in/zeros.bin")));
    assert!(agent.drain(DRAIN).await);

    assert!(dir.path().join("in/zeros.bin").exists());
    assert!(!dir.path().join("out").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn publish_templates_see_pipeline_constants() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display();
    write_file(&dir.path().join("in/a.bin"), b"x");

    let (doves, fake) = fake_dove_registry();
    let agent = agent_with_doves(
        &format!(
            r#"
pipelines:
  - name: announcer
    input: {base}/in
    glob: "*.bin"
    context:
      shelf: incoming
    process:
      - {{type: parse_filename}}
      - {{type: publish, arg: {{server: s1, msg: "{{filename}} filed under {{shelf}}"}}}}
"#
        ),
        doves,
    );
    agent.push(modified(dir.path().join("in/a.bin")));
    assert!(agent.drain(DRAIN).await);

    let published = fake.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].msg, "a.bin filed under incoming");
}
