// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use planloop_core::{Environment, UpdateError};
use planloop_storage::{create_session, NewSession};
use tempfile::tempdir;

fn fresh_home() -> (tempfile::TempDir, Home, String) {
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
    let session = state.session.as_str().to_string();
    (dir, home, session)
}

#[test]
fn add_tasks_bumps_version_and_schedules_first_task() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let body = format!(r#"{{"session":"{session}","add_tasks":[{{"title":"a","type":"feature"}}]}}"#);
    let out = run(&home, &config, &session, None, &body, SafeModeOverrides::default()).unwrap();
    assert_eq!(out["status"], "ok");
    assert_eq!(out["version"], 2);
}

#[test]
fn dry_run_does_not_persist() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let paths = session_paths(&home, &session).unwrap();
    let before = std::fs::read(paths.state_path()).unwrap();

    let body = format!(r#"{{"session":"{session}","add_tasks":[{{"title":"x"}}]}}"#);
    let overrides = SafeModeOverrides { dry_run: true, ..Default::default() };
    let out = run(&home, &config, &session, None, &body, overrides).unwrap();
    assert_eq!(out["dry_run"]["tasks"]["added"][0]["title"], "x");

    let after = std::fs::read(paths.state_path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn no_plan_edit_rejects_structural_payload() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let body = format!(r#"{{"session":"{session}","add_tasks":[{{"title":"x"}}]}}"#);
    let overrides = SafeModeOverrides { no_plan_edit: true, ..Default::default() };
    let err = run(&home, &config, &session, None, &body, overrides).unwrap_err();
    assert!(matches!(err, CliError::PlanEditBlocked));
}

#[test]
fn no_plan_edit_allows_status_only_payload() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let add_body = format!(r#"{{"session":"{session}","add_tasks":[{{"title":"a"}}]}}"#);
    run(&home, &config, &session, None, &add_body, SafeModeOverrides::default()).unwrap();

    let overrides = SafeModeOverrides { no_plan_edit: true, ..Default::default() };
    let status_body = format!(r#"{{"session":"{session}","tasks":[{{"id":1,"status":"IN_PROGRESS"}}]}}"#);
    let out = run(&home, &config, &session, None, &status_body, overrides).unwrap();
    assert_eq!(out["status"], "ok");
}

#[test]
fn strict_rejects_unknown_field() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let overrides = SafeModeOverrides { strict: true, ..Default::default() };
    let body = format!(r#"{{"session":"{session}","totally_unknown_field": 1}}"#);
    let err = run(&home, &config, &session, None, &body, overrides).unwrap_err();
    assert!(matches!(err, CliError::UnknownFields(_)));
}

/// A payload that is both stale (wrong version) and `strict`-violating
/// (unknown field) must report the version conflict first, matching the
/// documented gate order: session/version validation runs before the
/// `strict`/`no_plan_edit` safe-mode checks.
#[test]
fn stale_version_wins_over_strict_violation() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let overrides = SafeModeOverrides { strict: true, ..Default::default() };
    let body =
        format!(r#"{{"session":"{session}","last_seen_version":"99","totally_unknown_field":1}}"#);
    let err = run(&home, &config, &session, None, &body, overrides).unwrap_err();
    assert!(matches!(err, CliError::Update(UpdateError::VersionMismatch { .. })));
}

#[test]
fn version_mismatch_is_rejected() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let body = format!(r#"{{"session":"{session}","last_seen_version":"99"}}"#);
    let err = run(&home, &config, &session, None, &body, SafeModeOverrides::default()).unwrap_err();
    assert!(matches!(err, CliError::Update(UpdateError::VersionMismatch { .. })));
}

#[test]
fn malformed_json_is_rejected() {
    let (_dir, home, session) = fresh_home();
    let config = Config::default();
    let err = run(&home, &config, &session, None, "not json", SafeModeOverrides::default())
        .unwrap_err();
    assert!(matches!(err, CliError::MalformedInput(_)));
}
