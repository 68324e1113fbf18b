// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `status`: load a session, tick the deadlock detector, and report the
//! full picture an agent needs to decide what to do next.

use crate::context::{resolve_agent, session_paths};
use crate::error::CliError;
use planloop_core::{Now, NowReason, SessionState, SystemClock};
use planloop_storage::{check_deadlock, lock_info, load, queue_status, Config, Home};
use serde_json::{json, Value};

pub fn run(
    home: &Home,
    config: &Config,
    session: &str,
    agent_flag: Option<&str>,
) -> Result<Value, CliError> {
    let paths = session_paths(home, session)?;
    let mut state = load(&paths)?;
    check_deadlock(&paths, &mut state, config.deadlock.threshold)?;

    let viewer = resolve_agent(agent_flag);
    let clock = SystemClock;
    let queue = queue_status(&paths, config.lock.stale_entry_secs, &viewer, &clock)
        .map_err(|e| CliError::MalformedInput(e.to_string()))?;
    let lock = lock_info(&paths);

    Ok(json!({
        "session": state.session.as_str(),
        "now": state.now,
        "tasks": state.tasks,
        "signals": state.signals,
        "lock_info": lock,
        "lock_queue": queue,
        "safe_mode_defaults": {
            "dry_run": config.safe_mode.dry_run,
            "no_plan_edit": config.safe_mode.no_plan_edit,
            "strict": config.safe_mode.strict,
        },
        "agent_instructions": agent_instructions(&state),
    }))
}

/// Deterministic, non-LLM instruction text describing what `now` asks of
/// the agent. Distinct from the original's LLM-backed "suggest" feature,
/// which is out of scope.
fn agent_instructions(state: &SessionState) -> String {
    let Now { reason, task_id, signal_id } = &state.now;
    match reason {
        NowReason::CiBlocker => format!(
            "Blocked on signal `{}`. Resolve it, then close it with `planloop alert --close`.",
            signal_id.as_ref().map(|s| s.as_str()).unwrap_or("?")
        ),
        NowReason::Task => format!(
            "Work on task #{}. Report progress with `planloop update`.",
            task_id.map(|t| t.get()).unwrap_or(0)
        ),
        NowReason::Completed => {
            "All tasks are terminal. Call `planloop update` with done=true and a final_summary."
                .to_string()
        }
        NowReason::Idle => "No ready work. Add tasks with `planloop update`.".to_string(),
        NowReason::WaitingOnLock => {
            "Another agent holds the session lock. Retry shortly.".to_string()
        }
        NowReason::Deadlocked => {
            "No progress detected across repeated status calls. Investigate before continuing."
                .to_string()
        }
        NowReason::Escalated => {
            "The session has been escalated; check signals before proceeding.".to_string()
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
