// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn create_then_list_then_info() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();

    let created = create(
        &home,
        CreateArgs {
            name: "tester".to_string(),
            title: "Test session".to_string(),
            purpose: "exercise sessions command".to_string(),
            project_root: "/tmp/proj".to_string(),
            branch: None,
        },
    )
    .unwrap();
    let session_id = created["session"].as_str().unwrap().to_string();

    let listed = list(&home).unwrap();
    assert_eq!(listed["sessions"].as_array().unwrap().len(), 1);

    let info_out = info(&home, &session_id).unwrap();
    assert_eq!(info_out["registry"]["session"], session_id);
    assert_eq!(info_out["state"]["session"], session_id);
}

#[test]
fn info_on_unknown_session_is_not_found() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    let err = info(&home, "does-not-exist").unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
}
