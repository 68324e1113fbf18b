// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sessions list` / `sessions info` / `sessions create`: registry browsing
//! and session bootstrap. The command table in spec.md §6.1 has no
//! creation verb; one is added here, grounded in the original's
//! `create_session`, since an agent has to start somewhere.

use crate::context::session_paths;
use crate::error::CliError;
use planloop_core::{Environment, SystemClock};
use planloop_storage::{create_session, find_entry, load_registry, persist, Home, NewSession};
use serde_json::{json, Value};

pub fn list(home: &Home) -> Result<Value, CliError> {
    let entries = load_registry(home)?;
    Ok(json!({ "sessions": entries }))
}

pub fn info(home: &Home, session: &str) -> Result<Value, CliError> {
    let entry = find_entry(home, session)?.ok_or_else(|| CliError::NotFound(session.to_string()))?;
    let paths = session_paths(home, session)?;
    let state = persist::load(&paths)?;
    Ok(json!({ "registry": entry, "state": state }))
}

/// Arguments for bootstrapping a brand-new session.
#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub name: String,
    pub title: String,
    pub purpose: String,
    pub project_root: String,
    pub branch: Option<String>,
}

pub fn create(home: &Home, args: CreateArgs) -> Result<Value, CliError> {
    let clock = SystemClock;
    let state = create_session(
        home,
        NewSession {
            name: &args.name,
            title: &args.title,
            purpose: &args.purpose,
            project_root: &args.project_root,
            branch: args.branch.as_deref(),
            environment: Environment::default(),
        },
        &clock,
    )?;
    Ok(json!({ "session": state.session.as_str(), "now": state.now }))
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
