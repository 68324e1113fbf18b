// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use planloop_core::Environment;
use planloop_storage::{create_session, NewSession};
use tempfile::tempdir;

#[test]
fn reports_no_lock_and_empty_log_for_fresh_session() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    let clk = SystemClock;
    let state = create_session(
        &home,
        NewSession {
            name: "tester",
            title: "Test session",
            purpose: "",
            project_root: "/tmp/proj",
            branch: None,
            environment: Environment::default(),
        },
        &clk,
    )
    .unwrap();

    let config = Config::default();
    let out = run(&home, &config, state.session.as_str(), None).unwrap();
    assert_eq!(out["lock_info"], serde_json::Value::Null);
    assert_eq!(out["recent_log_lines"].as_array().unwrap().len(), 0);
}

#[test]
fn missing_session_is_not_found() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    let config = Config::default();
    let err = run(&home, &config, "does-not-exist", None).unwrap_err();
    assert!(matches!(err, CliError::NotFound(_)));
}
