// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applying a client-submitted [`UpdatePayload`] to a [`SessionState`].

use crate::clock::Clock;
use crate::id::TaskId;
use crate::scheduler::compute_now;
use crate::session_state::SessionState;
use crate::task::{Task, TaskType};
use crate::update_payload::{AddTaskInput, TaskStatusPatch, UpdatePayload, UpdateTaskInput};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("payload session {payload} does not match state session {state}")]
    SessionMismatch { payload: String, state: String },
    #[error("version mismatch: client last saw {seen}, current is {current}")]
    VersionMismatch { seen: String, current: u64 },
    #[error("unknown task id {0}")]
    UnknownTask(TaskId),
}

/// Reject an update before any mutation if it targets the wrong session or
/// is stale relative to the session's optimistic-concurrency version.
pub fn validate_update_payload(
    state: &SessionState,
    payload: &UpdatePayload,
) -> Result<(), UpdateError> {
    if !payload.session.is_empty() && payload.session != state.session.as_str() {
        return Err(UpdateError::SessionMismatch {
            payload: payload.session.clone(),
            state: state.session.as_str().to_string(),
        });
    }
    if let Some(seen) = &payload.last_seen_version {
        if seen.0 != state.version.to_string() {
            return Err(UpdateError::VersionMismatch {
                seen: seen.0.clone(),
                current: state.version,
            });
        }
    }
    Ok(())
}

fn apply_task_patch(task: &mut Task, patch: &TaskStatusPatch, clock: &dyn Clock) {
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(title) = &patch.new_title {
        task.title = title.clone();
    }
    task.last_updated_at = Some(clock.now());
}

fn apply_update_task(task: &mut Task, update: &UpdateTaskInput, clock: &dyn Clock) {
    if let Some(title) = &update.new_title {
        task.title = title.clone();
    }
    if let Some(kind) = update.new_type {
        task.kind = kind;
    }
    if let Some(status) = update.status {
        task.status = status;
    }
    task.last_updated_at = Some(clock.now());
}

fn next_task_id(state: &SessionState) -> TaskId {
    state
        .tasks
        .iter()
        .map(|t| t.id.get())
        .max()
        .map_or(TaskId::new(1), |max| TaskId::new(max + 1))
}

fn add_new_task(state: &mut SessionState, add: &AddTaskInput, new_id: TaskId) {
    let mut task = Task::new(new_id, add.title.clone(), add.kind.unwrap_or_default());
    task.depends_on = add.depends_on.clone();
    task.implementation_notes = add.implementation_notes.clone();
    state.tasks.push(task);
}

/// Apply a validated payload, mutating `state` in place and recomputing
/// `now`. Fields that are collection-typed on the payload (`context_notes`,
/// `next_steps`) replace the existing value only when non-empty;
/// `artifacts` always extends.
pub fn apply_update(
    state: &mut SessionState,
    payload: &UpdatePayload,
    clock: &dyn Clock,
) -> Result<(), UpdateError> {
    validate_update_payload(state, payload)?;

    for patch in &payload.tasks {
        let task = state
            .task_mut(patch.id)
            .ok_or(UpdateError::UnknownTask(patch.id))?;
        apply_task_patch(task, patch, clock);
    }

    for upd in &payload.update_tasks {
        let task = state
            .task_mut(upd.id)
            .ok_or(UpdateError::UnknownTask(upd.id))?;
        apply_update_task(task, upd, clock);
    }

    let mut next_id = next_task_id(state);
    for add in &payload.add_tasks {
        add_new_task(state, add, next_id);
        next_id = TaskId::new(next_id.get() + 1);
    }

    if !payload.context_notes.is_empty() {
        state.context_notes = payload.context_notes.clone();
    }
    if !payload.next_steps.is_empty() {
        state.next_steps = payload.next_steps.clone();
    }
    if !payload.artifacts.is_empty() {
        state.artifacts.extend(payload.artifacts.iter().cloned());
    }
    if let Some(summary) = &payload.final_summary {
        state.final_summary = Some(summary.clone());
    }
    if payload.done {
        state.done = true;
    }

    state.last_updated_at = clock.now();
    state.version += 1;
    state.now = compute_now(state);
    Ok(())
}

#[cfg(test)]
#[path = "update_tests.rs"]
mod tests;
