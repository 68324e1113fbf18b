// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn resolve_home_honors_override() {
    let dir = tempdir().unwrap();
    std::env::set_var("PLANLOOP_HOME", dir.path());
    assert_eq!(resolve_home(), dir.path());
    std::env::remove_var("PLANLOOP_HOME");
}

#[test]
fn current_session_is_none_when_pointer_missing() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    assert!(home.current_session().is_none());
}

#[test]
fn set_and_read_current_session_roundtrips() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    home.set_current_session("demo-20260101-abcd").unwrap();
    assert_eq!(home.current_session().as_deref(), Some("demo-20260101-abcd"));
}

#[test]
fn empty_pointer_file_is_none() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    home.ensure().unwrap();
    std::fs::write(home.current_session_path(), "   \n").unwrap();
    assert!(home.current_session().is_none());
}

#[test]
fn session_paths_are_scoped_under_session_dir() {
    let dir = tempdir().unwrap();
    let paths = SessionPaths::new(dir.path().join("sessions/s1"));
    paths.ensure().unwrap();
    assert!(paths.lock_queue_dir().starts_with(dir.path()));
    assert!(paths.logs_dir().exists());
}
