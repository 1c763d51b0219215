// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind, RenameMode};
use std::time::Duration;

fn tree(root: &Path) {
    std::fs::create_dir_all(root.join("sub/deeper")).unwrap();
    std::fs::write(root.join("a.txt"), b"a").unwrap();
    std::fs::write(root.join("sub/b.txt"), b"b").unwrap();
}

#[test]
fn initial_scan_lists_files_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    tree(dir.path());

    let mut events = initial_scan(&[dir.path().to_path_buf()]);
    events.sort_by(|a, b| a.path.cmp(&b.path));

    let paths: Vec<&Path> = events.iter().map(|e| e.path.as_path()).collect();
    assert_eq!(
        paths,
        vec![
            dir.path().join("a.txt").as_path(),
            dir.path().join("sub").as_path(),
            dir.path().join("sub/b.txt").as_path(),
            dir.path().join("sub/deeper").as_path(),
        ]
    );
    assert!(events.iter().all(|e| e.kind == FsEventKind::Initialize));
    assert!(events.iter().find(|e| e.path.ends_with("sub")).unwrap().is_dir);
    assert!(!events.iter().find(|e| e.path.ends_with("a.txt")).unwrap().is_dir);
}

#[test]
fn initial_scan_of_missing_root_is_empty() {
    let events = initial_scan(&[PathBuf::from("/nonexistent/root-xyz")]);
    assert!(events.is_empty());
}

#[yare::parameterized(
    create = { EventKind::Create(CreateKind::File), Some(FsEventKind::Modified) },
    data_change = { EventKind::Modify(ModifyKind::Data(DataChange::Content)), Some(FsEventKind::Modified) },
    metadata = { EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions)), Some(FsEventKind::Modified) },
    rename = { EventKind::Modify(ModifyKind::Name(RenameMode::To)), Some(FsEventKind::Moved) },
    remove = { EventKind::Remove(RemoveKind::File), None },
    access = { EventKind::Access(notify::event::AccessKind::Read), None },
)]
fn translate_maps_notify_kinds(kind: EventKind, expected: Option<FsEventKind>) {
    let event = notify::Event::new(kind).add_path(PathBuf::from("/tmp/x"));
    let translated = translate(&event);
    match expected {
        Some(kind) => {
            assert_eq!(translated.len(), 1);
            assert_eq!(translated[0].kind, kind);
            assert_eq!(translated[0].path, PathBuf::from("/tmp/x"));
        }
        None => assert!(translated.is_empty()),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn live_watcher_delivers_events_for_new_files() {
    let dir = tempfile::tempdir().unwrap();
    let (tx, mut rx) = mpsc::channel(64);
    let _handle = spawn_watcher(&[dir.path().to_path_buf()], tx).unwrap();

    // Give the backend a moment to arm before producing the event.
    tokio::time::sleep(Duration::from_millis(200)).await;
    std::fs::write(dir.path().join("fresh.txt"), b"data").unwrap();

    let expected = dir.path().join("fresh.txt");
    let received = tokio::time::timeout(Duration::from_secs(5), async {
        while let Some(event) = rx.recv().await {
            if event.path == expected {
                return true;
            }
        }
        false
    })
    .await
    .unwrap();
    assert!(received);
}

#[test]
fn watching_a_missing_root_fails() {
    let (tx, _rx) = mpsc::channel(1);
    assert!(matches!(
        spawn_watcher(&[PathBuf::from("/nonexistent/root-xyz")], tx),
        Err(WatchError::Watch { .. })
    ));
}
