// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn form_contains_body_only_for_bare_message() {
    let bark = Bark::new("key", None);
    let form = bark.form(&Message {
        msg: "done".into(),
        ..Message::default()
    });
    assert_eq!(form, vec![("body", "done".to_string())]);
}

#[test]
fn form_includes_title_and_group() {
    let bark = Bark::new("key", None);
    let form = bark.form(&Message {
        title: Some("sorter".into()),
        msg: "done".into(),
        group: Some("nas".into()),
        ..Message::default()
    });
    assert_eq!(
        form,
        vec![
            ("body", "done".to_string()),
            ("title", "sorter".to_string()),
            ("group", "nas".to_string()),
        ]
    );
}

#[test]
fn message_group_overrides_channel_default() {
    let bark = Bark::new("key", Some("default-group".into()));
    let form = bark.form(&Message {
        msg: "m".into(),
        group: Some("explicit".into()),
        ..Message::default()
    });
    assert!(form.contains(&("group", "explicit".to_string())));

    let form = bark.form(&Message {
        msg: "m".into(),
        ..Message::default()
    });
    assert!(form.contains(&("group", "default-group".to_string())));
}
