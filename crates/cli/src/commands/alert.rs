// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `alert`: open or close a signal under the session lock (spec.md §4.7).

use crate::context::{resolve_agent, session_paths};
use crate::error::CliError;
use planloop_core::{close_signal, open_signal, validate, Signal, SignalId, SignalLevel, SignalType, SystemClock};
use planloop_storage::{acquire_lock, load, save, Config, Home};
use serde_json::{json, Value};

/// Per-field flags for one `alert` invocation; opening a signal requires
/// `kind`, `title`, and `message`, closing requires only the id.
#[derive(Debug, Clone, Default)]
pub struct AlertArgs {
    pub close: bool,
    pub level: Option<SignalLevel>,
    pub signal_type: Option<SignalType>,
    pub kind: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub link: Option<String>,
}

pub fn run(
    home: &Home,
    config: &Config,
    session: &str,
    agent_flag: Option<&str>,
    signal_id: &str,
    args: AlertArgs,
) -> Result<Value, CliError> {
    let paths = session_paths(home, session)?;
    let clock = SystemClock;
    let agent = resolve_agent(agent_flag);

    let guard = acquire_lock(home, &paths, &agent, "alert", &config.lock, &clock)?;
    let mut state = load(&paths)?;

    if args.close {
        close_signal(&mut state, &SignalId::new(signal_id), &clock)?;
    } else {
        let kind = args.kind.ok_or_else(|| {
            CliError::MalformedInput("opening a signal requires --kind".to_string())
        })?;
        let title = args.title.ok_or_else(|| {
            CliError::MalformedInput("opening a signal requires --title".to_string())
        })?;
        let message = args.message.ok_or_else(|| {
            CliError::MalformedInput("opening a signal requires --message".to_string())
        })?;
        let level = args.level.unwrap_or(SignalLevel::Info);
        let signal_type = args.signal_type.unwrap_or(SignalType::Other);

        let mut signal = Signal::new(signal_id, signal_type, kind, level, title, message);
        signal.link = args.link;
        open_signal(&mut state, signal, &clock)?;
    }

    validate(&state)?;
    save(home, &paths, &mut state, &clock)?;
    drop(guard);

    Ok(json!({ "status": "ok" }))
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
