// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use planloop_core::test_support::fresh_state;
use tempfile::tempdir;

#[test]
fn missing_registry_loads_empty() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    assert!(load_registry(&home).unwrap().is_empty());
}

#[test]
fn upsert_inserts_then_replaces() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    let state = fresh_state("s1");
    upsert_registry_entry(&home, RegistryEntry::from_state(&state)).unwrap();
    assert_eq!(load_registry(&home).unwrap().len(), 1);

    let mut updated = state.clone();
    updated.title = "renamed".to_string();
    upsert_registry_entry(&home, RegistryEntry::from_state(&updated)).unwrap();

    let entries = load_registry(&home).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "renamed");
}

#[test]
fn find_entry_returns_none_for_unknown_session() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    assert!(find_entry(&home, "missing").unwrap().is_none());
}
