// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use planloop_core::test_support::fresh_state;
use planloop_core::FakeClock;
use tempfile::tempdir;

#[test]
fn save_then_load_roundtrips() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    let paths = SessionPaths::new(home.session_dir("s1"));
    paths.ensure().unwrap();

    let mut state = fresh_state("s1");
    let clock = FakeClock::new(chrono::Utc::now());
    save(&home, &paths, &mut state, &clock).unwrap();

    let loaded = load(&paths).unwrap();
    assert_eq!(loaded.session, state.session);
    assert_eq!(loaded.version, state.version);
}

#[test]
fn save_writes_plan_document_and_registry_entry() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    let paths = SessionPaths::new(home.session_dir("s1"));
    paths.ensure().unwrap();

    let mut state = fresh_state("s1");
    let clock = FakeClock::new(chrono::Utc::now());
    save(&home, &paths, &mut state, &clock).unwrap();

    assert!(paths.plan_path().exists());
    let entry = crate::registry::find_entry(&home, "s1").unwrap();
    assert!(entry.is_some());
}

#[test]
fn load_missing_session_fails_not_found() {
    let dir = tempdir().unwrap();
    let paths = SessionPaths::new(dir.path().join("sessions/missing"));
    let err = load(&paths).unwrap_err();
    assert!(matches!(err, PersistError::NotFound(_)));
}

#[test]
fn save_rejects_invalid_state_without_writing() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    let paths = SessionPaths::new(home.session_dir("s1"));
    paths.ensure().unwrap();

    let mut state = fresh_state("s1");
    state.schema_version = 999;
    let clock = FakeClock::new(chrono::Utc::now());
    let err = save(&home, &paths, &mut state, &clock).unwrap_err();
    assert!(matches!(err, PersistError::Validation(_)));
    assert!(!paths.state_path().exists());
}
