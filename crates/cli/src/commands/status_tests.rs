// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use planloop_core::{Environment, FakeClock};
use planloop_storage::{create_session, Config, NewSession};
use tempfile::tempdir;

fn clock() -> FakeClock {
    FakeClock::new(chrono::Utc::now())
}

#[test]
fn reports_idle_for_fresh_session() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    let clk = clock();
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
    assert_eq!(out["now"]["reason"], "idle");
    assert_eq!(out["lock_info"], serde_json::Value::Null);
    assert!(out["agent_instructions"].as_str().unwrap().contains("Add tasks"));
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
