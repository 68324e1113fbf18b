// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::fs;
use tempfile::tempdir;

#[test]
fn flag_wins_over_everything() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    home.set_current_session("pointer-session").unwrap();
    assert_eq!(resolve_session(&home, Some("flag-session")).unwrap(), "flag-session");
}

#[test]
fn pointer_wins_over_env() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    home.set_current_session("pointer-session").unwrap();
    assert_eq!(resolve_session(&home, None).unwrap(), "pointer-session");
}

#[test]
#[serial]
fn env_var_is_last_resort() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    std::env::set_var("PLANLOOP_SESSION", "env-session");
    let result = resolve_session(&home, None);
    std::env::remove_var("PLANLOOP_SESSION");
    assert_eq!(result.unwrap(), "env-session");
}

#[test]
fn nothing_resolved_is_an_error() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    assert!(resolve_session(&home, None).is_err());
}

#[test]
fn agent_flag_wins_over_env_and_default() {
    assert_eq!(resolve_agent(Some("agent-x")), "agent-x");
}

#[test]
fn agent_falls_back_to_default() {
    assert_eq!(resolve_agent(None).is_empty(), false);
}

#[test]
fn session_paths_requires_existing_state_file() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    assert!(matches!(
        session_paths(&home, "missing"),
        Err(CliError::NotFound(_))
    ));

    let session_dir = home.session_dir("present");
    fs::create_dir_all(&session_dir).unwrap();
    fs::write(session_dir.join("state.json"), "{}").unwrap();
    assert!(session_paths(&home, "present").is_ok());
}
