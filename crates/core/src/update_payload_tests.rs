// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn last_seen_version_coerces_integer_to_string() {
    let json = serde_json::json!({
        "session": "s1",
        "last_seen_version": 3,
    });
    let payload: UpdatePayload = serde_json::from_value(json).unwrap();
    assert_eq!(payload.last_seen_version, Some(VersionToken("3".to_string())));
}

#[test]
fn last_seen_version_accepts_string() {
    let json = serde_json::json!({
        "session": "s1",
        "last_seen_version": "3",
    });
    let payload: UpdatePayload = serde_json::from_value(json).unwrap();
    assert_eq!(payload.last_seen_version, Some(VersionToken("3".to_string())));
}

#[test]
fn minimal_payload_defaults_all_optional_fields() {
    let json = serde_json::json!({"session": "s1"});
    let payload: UpdatePayload = serde_json::from_value(json).unwrap();
    assert!(payload.tasks.is_empty());
    assert!(payload.add_tasks.is_empty());
    assert!(payload.last_seen_version.is_none());
    assert!(payload.agent.is_none());
}
