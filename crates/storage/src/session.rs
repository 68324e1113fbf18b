// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session creation and id generation.

use crate::error::PersistError;
use crate::home::{Home, SessionPaths};
use planloop_core::{Clock, Environment, Now, PromptMetadata, SessionState, CURRENT_SCHEMA_VERSION};
use uuid::Uuid;

/// Slugify `name` into lowercase ascii-alnum-and-dash, matching the id's
/// human-readable prefix.
fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && !out.is_empty() {
            out.push('-');
            last_was_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        "session".to_string()
    } else {
        out
    }
}

/// Generate `<slug>-<UTC timestamp>-<short random>`.
pub fn generate_session_id(name: &str, clock: &dyn Clock) -> String {
    let slug = slugify(name);
    let ts = clock.now().format("%Y%m%dT%H%M%SZ");
    let short_random = Uuid::new_v4().simple().to_string()[..8].to_string();
    format!("{slug}-{ts}-{short_random}")
}

/// Parameters supplied by the caller creating a new session.
pub struct NewSession<'a> {
    pub name: &'a str,
    pub title: &'a str,
    pub purpose: &'a str,
    pub project_root: &'a str,
    pub branch: Option<&'a str>,
    pub environment: Environment,
}

/// Create a fresh session directory with an empty, valid `SessionState`.
pub fn create_session(
    home: &Home,
    new: NewSession<'_>,
    clock: &dyn Clock,
) -> Result<SessionState, PersistError> {
    let id = generate_session_id(new.name, clock);
    let paths = SessionPaths::new(home.session_dir(&id));
    paths.ensure()?;

    let now = clock.now();
    let mut state = SessionState {
        schema_version: CURRENT_SCHEMA_VERSION,
        version: 1,
        session: id.as_str().into(),
        name: new.name.to_string(),
        title: new.title.to_string(),
        purpose: new.purpose.to_string(),
        created_at: now,
        last_updated_at: now,
        project_root: new.project_root.to_string(),
        branch: new.branch.map(str::to_string),
        prompts: PromptMetadata::default(),
        environment: new.environment,
        tasks: Vec::new(),
        signals: Vec::new(),
        next_steps: Vec::new(),
        context_notes: Vec::new(),
        artifacts: Vec::new(),
        tags: Vec::new(),
        now: Now::idle(),
        done: false,
        final_summary: None,
    };

    crate::persist::save(home, &paths, &mut state, clock)?;
    crate::deadlock::seed_tracker(&state)?.persist(&paths.deadlock_path())?;
    home.set_current_session(&id)?;
    Ok(state)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
