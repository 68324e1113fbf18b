// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn session_id_display_and_eq() {
    let id = SessionId::new("my-session-20260101T000000Z-ab12");
    assert_eq!(id.as_str(), "my-session-20260101T000000Z-ab12");
    assert_eq!(id, "my-session-20260101T000000Z-ab12");
    assert_eq!(id.to_string(), "my-session-20260101T000000Z-ab12");
}

#[test]
fn task_id_ordering() {
    let a = TaskId::new(1);
    let b = TaskId::new(2);
    assert!(a < b);
    assert_eq!(a.get(), 1);
}

#[test]
fn task_id_serde_roundtrip() {
    let id = TaskId::new(7);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "7");
    let parsed: TaskId = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn signal_id_from_str() {
    let id: SignalId = "ci1".into();
    assert_eq!(id.as_str(), "ci1");
}
