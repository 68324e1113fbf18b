// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `debug`: a diagnostic snapshot for a stuck or misbehaving session —
//! lock/queue state, the deadlock tracker, and a tail of the session log.

use crate::context::{resolve_agent, session_paths};
use crate::error::CliError;
use planloop_core::SystemClock;
use planloop_storage::{lock_info, queue_status, Config, DeadlockTracker, Home};
use serde_json::{json, Value};
use std::fs;

const LOG_TAIL_LINES: usize = 50;

pub fn run(
    home: &Home,
    config: &Config,
    session: &str,
    agent_flag: Option<&str>,
) -> Result<Value, CliError> {
    let paths = session_paths(home, session)?;
    let viewer = resolve_agent(agent_flag);
    let clock = SystemClock;

    let lock = lock_info(&paths);
    let queue = queue_status(&paths, config.lock.stale_entry_secs, &viewer, &clock)
        .map_err(|e| CliError::MalformedInput(e.to_string()))?;
    let tracker = DeadlockTracker::load(&paths.deadlock_path())?;

    Ok(json!({
        "session": session,
        "lock_info": lock,
        "lock_queue": queue,
        "deadlock_tracker": tracker,
        "recent_log_lines": tail_lines(&paths.log_path(), LOG_TAIL_LINES),
    }))
}

fn tail_lines(path: &std::path::Path, n: usize) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
