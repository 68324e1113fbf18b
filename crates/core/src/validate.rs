// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural and invariant validation of a [`SessionState`].

use crate::id::TaskId;
use crate::scheduler::compute_now;
use crate::session_state::{SessionState, CURRENT_SCHEMA_VERSION};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateValidationError {
    #[error("unsupported schema version {0}, expected {CURRENT_SCHEMA_VERSION}")]
    UnsupportedSchemaVersion(u32),
    #[error("duplicate task id {0}")]
    DuplicateTaskId(TaskId),
    #[error("task {task} depends on itself")]
    SelfDependency { task: TaskId },
    #[error("task {task} depends on unknown task {dependency}")]
    UnknownDependency { task: TaskId, dependency: TaskId },
    #[error("dependency cycle detected involving task {0}")]
    DependencyCycle(TaskId),
    #[error("stored `now` does not match the value computed from task/signal state")]
    StaleNow,
}

/// Validate structural invariants and, for non-override reasons, that
/// `state.now` agrees with what [`compute_now`] would derive fresh.
///
/// Override reasons (`waiting_on_lock`, `deadlocked`, `escalated`) are
/// written by the lock/deadlock subsystems after scheduling runs, so the
/// stored-vs-computed check is skipped for those.
pub fn validate(state: &SessionState) -> Result<(), StateValidationError> {
    if state.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(StateValidationError::UnsupportedSchemaVersion(
            state.schema_version,
        ));
    }

    let mut seen = HashSet::new();
    for task in &state.tasks {
        if !seen.insert(task.id) {
            return Err(StateValidationError::DuplicateTaskId(task.id));
        }
    }

    let known: HashSet<TaskId> = state.tasks.iter().map(|t| t.id).collect();
    for task in &state.tasks {
        for dep in &task.depends_on {
            if *dep == task.id {
                return Err(StateValidationError::SelfDependency { task: task.id });
            }
            if !known.contains(dep) {
                return Err(StateValidationError::UnknownDependency {
                    task: task.id,
                    dependency: *dep,
                });
            }
        }
    }

    check_acyclic(state)?;

    if !state.now.reason.is_override() && state.now != compute_now(state) {
        return Err(StateValidationError::StaleNow);
    }

    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

fn check_acyclic(state: &SessionState) -> Result<(), StateValidationError> {
    let mut marks: std::collections::HashMap<TaskId, Mark> = std::collections::HashMap::new();

    for task in &state.tasks {
        if !marks.contains_key(&task.id) {
            visit(state, task.id, &mut marks)?;
        }
    }
    Ok(())
}

fn visit(
    state: &SessionState,
    id: TaskId,
    marks: &mut std::collections::HashMap<TaskId, Mark>,
) -> Result<(), StateValidationError> {
    marks.insert(id, Mark::InProgress);
    if let Some(task) = state.task(id) {
        for dep in &task.depends_on {
            match marks.get(dep) {
                Some(Mark::InProgress) => {
                    return Err(StateValidationError::DependencyCycle(*dep));
                }
                Some(Mark::Done) => continue,
                None => visit(state, *dep, marks)?,
            }
        }
    }
    marks.insert(id, Mark::Done);
    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
