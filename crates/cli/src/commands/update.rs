// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `update`: the versioned, lock-serialized mutation pipeline (spec.md
//! §4.6). Order matters: the session/version check runs before the
//! `strict`/`no_plan_edit` gates, so a payload that is both stale and
//! malformed reports the version conflict, not the safe-mode rejection.
//! Outside dry-run, the update mutates and persists under the session lock.

use crate::context::{resolve_agent, session_paths};
use crate::error::CliError;
use planloop_core::update::validate_update_payload;
use planloop_core::{apply_update, SessionState, SystemClock, Task, TaskId, UpdatePayload};
use planloop_storage::{acquire_lock, load, save, Config, Home};
use serde_json::{json, Map, Value};

const ALLOWED_FIELDS: &[&str] = &[
    "session",
    "last_seen_version",
    "tasks",
    "add_tasks",
    "update_tasks",
    "context_notes",
    "next_steps",
    "artifacts",
    "agent",
    "final_summary",
    "done",
];

/// Resolved safe-mode flags for one invocation: config defaults already
/// overridden by whichever `--dry-run`/`--strict`/... flags were given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeModeOverrides {
    pub dry_run: bool,
    pub no_plan_edit: bool,
    pub strict: bool,
}

pub fn run(
    home: &Home,
    config: &Config,
    session: &str,
    agent_flag: Option<&str>,
    raw_body: &str,
    safe_mode: SafeModeOverrides,
) -> Result<Value, CliError> {
    let raw: Value = serde_json::from_str(raw_body)
        .map_err(|e| CliError::MalformedInput(format!("invalid JSON: {e}")))?;
    let payload: UpdatePayload = serde_json::from_value(raw.clone())
        .map_err(|e| CliError::MalformedInput(format!("invalid update payload: {e}")))?;

    let paths = session_paths(home, session)?;
    let clock = SystemClock;
    let state = load(&paths)?;
    validate_update_payload(&state, &payload)?;

    if safe_mode.strict {
        check_unknown_fields(&raw)?;
    }
    if safe_mode.no_plan_edit && touches_plan_structure(&payload) {
        return Err(CliError::PlanEditBlocked);
    }

    if safe_mode.dry_run {
        let mut after = state.clone();
        apply_update(&mut after, &payload, &clock)?;
        return Ok(json!({ "dry_run": state_diff(&state, &after) }));
    }

    let agent = resolve_agent(agent_flag);
    let mut state = state;
    let guard = acquire_lock(home, &paths, &agent, "update", &config.lock, &clock)?;
    apply_update(&mut state, &payload, &clock)?;
    planloop_core::validate(&state)?;
    save(home, &paths, &mut state, &clock)?;
    drop(guard);

    Ok(json!({ "status": "ok", "version": state.version }))
}

fn check_unknown_fields(raw: &Value) -> Result<(), CliError> {
    let Value::Object(map) = raw else {
        return Err(CliError::MalformedInput(
            "update payload must be a JSON object".to_string(),
        ));
    };
    let unknown: Vec<String> = map
        .keys()
        .filter(|k| !ALLOWED_FIELDS.contains(&k.as_str()))
        .cloned()
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(CliError::UnknownFields(unknown))
    }
}

fn touches_plan_structure(payload: &UpdatePayload) -> bool {
    !payload.add_tasks.is_empty()
        || !payload.update_tasks.is_empty()
        || !payload.context_notes.is_empty()
        || !payload.next_steps.is_empty()
        || !payload.artifacts.is_empty()
}

fn task_by_id(tasks: &[Task], id: TaskId) -> Option<&Task> {
    tasks.iter().find(|t| t.id == id)
}

fn task_snapshot(task: &Task) -> Value {
    json!({
        "id": task.id,
        "title": task.title,
        "type": task.kind,
        "status": task.status,
    })
}

/// A human-friendly before/after summary of one `apply_update` call,
/// grounded in the original's `state_diff` shape.
fn state_diff(before: &SessionState, after: &SessionState) -> Value {
    let mut added = Vec::new();
    let mut updated = Vec::new();
    for task in &after.tasks {
        match task_by_id(&before.tasks, task.id) {
            None => added.push(task_snapshot(task)),
            Some(orig) => {
                let mut changes = Map::new();
                if orig.title != task.title {
                    changes.insert(
                        "title".to_string(),
                        json!({ "before": orig.title, "after": task.title }),
                    );
                }
                if orig.kind != task.kind {
                    changes.insert(
                        "type".to_string(),
                        json!({ "before": orig.kind, "after": task.kind }),
                    );
                }
                if orig.status != task.status {
                    changes.insert(
                        "status".to_string(),
                        json!({ "before": orig.status, "after": task.status }),
                    );
                }
                if !changes.is_empty() {
                    updated.push(json!({ "task": task_snapshot(task), "changes": changes }));
                }
            }
        }
    }
    let mut removed = Vec::new();
    for task in &before.tasks {
        if task_by_id(&after.tasks, task.id).is_none() {
            removed.push(task_snapshot(task));
        }
    }

    let mut diff = json!({
        "version": { "before": before.version, "after": after.version },
        "tasks": { "added": added, "updated": updated, "removed": removed },
    });

    if before.context_notes != after.context_notes {
        diff["context_notes"] =
            json!({ "before": before.context_notes, "after": after.context_notes });
    }
    if before.next_steps != after.next_steps {
        diff["next_steps"] = json!({ "before": before.next_steps, "after": after.next_steps });
    }
    if before.final_summary != after.final_summary {
        diff["final_summary"] =
            json!({ "before": before.final_summary, "after": after.final_summary });
    }

    diff
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
