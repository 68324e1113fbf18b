// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `compute_now`: the pure dependency scheduler.

use crate::now::Now;
use crate::session_state::SessionState;
use crate::task::TaskStatus;

/// Derive the single next-action descriptor from session state.
///
/// Ordering is normative (spec order, not a design choice):
/// 1. an open blocker signal always wins
/// 2. an in-progress task is the active task
/// 3. the first TODO task whose dependencies are all DONE is the next task
/// 4. every task terminal-complete (DONE/OUT_OF_SCOPE/SKIPPED) -> completed
/// 5. otherwise idle
///
/// "First" means earliest in `state.tasks`' insertion order throughout.
pub fn compute_now(state: &SessionState) -> Now {
    if let Some(signal) = state.signals.iter().find(|s| s.is_open_blocker()) {
        return Now::ci_blocker(signal.id.clone());
    }

    if let Some(task) = state
        .tasks
        .iter()
        .find(|t| t.status == TaskStatus::InProgress)
    {
        return Now::task(task.id);
    }

    if let Some(task) = state.tasks.iter().find(|t| is_ready(state, t)) {
        return Now::task(task.id);
    }

    if !state.tasks.is_empty()
        && state.tasks.iter().all(|t| {
            matches!(
                t.status,
                TaskStatus::Done | TaskStatus::OutOfScope | TaskStatus::Skipped
            )
        })
    {
        return Now::completed();
    }

    Now::idle()
}

fn is_ready(state: &SessionState, task: &crate::task::Task) -> bool {
    task.status == TaskStatus::Todo
        && task.depends_on.iter().all(|dep_id| {
            state
                .task(*dep_id)
                .is_some_and(|dep| dep.status == TaskStatus::Done)
        })
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
