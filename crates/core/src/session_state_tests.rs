// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::id::TaskId;
use crate::task::TaskType;
use crate::test_support::fresh_state;

#[test]
fn task_lookup_by_id() {
    let mut state = fresh_state("s1");
    state.tasks.push(Task::new(TaskId::new(1), "a", TaskType::Chore));
    assert!(state.task(TaskId::new(1)).is_some());
    assert!(state.task(TaskId::new(2)).is_none());
    state.task_mut(TaskId::new(1)).unwrap().title = "b".to_string();
    assert_eq!(state.task(TaskId::new(1)).unwrap().title, "b");
}

#[test]
fn default_schema_version_applies_on_missing_field() {
    let json = serde_json::json!({
        "session": "s1",
        "name": "n",
        "title": "t",
        "created_at": "2026-01-01T00:00:00Z",
        "last_updated_at": "2026-01-01T00:00:00Z",
        "project_root": "/tmp",
        "prompts": {"set": "core-v1"},
        "environment": {"os": "linux"},
        "now": {"reason": "idle"},
    });
    let state: SessionState = serde_json::from_value(json).unwrap();
    assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(state.version, 0);
}
