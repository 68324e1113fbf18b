// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolving the ambient inputs every command needs: the home root, which
//! session a call targets, and which agent identity to stamp on lock
//! metadata. None of this is state — it is read fresh on every invocation.

use crate::error::CliError;
use planloop_storage::{Home, SessionPaths};

const DEFAULT_AGENT_NAME: &str = "unknown-agent";

/// Resolve the target session id.
///
/// Precedence: `--session` flag > `<home>/current_session` pointer >
/// `PLANLOOP_SESSION` env var. spec.md §6.4 lists the env var as a
/// "fallback... after checking `current_session`"; a flag always wins since
/// it is the most specific signal the caller can give.
pub fn resolve_session(home: &Home, flag: Option<&str>) -> Result<String, CliError> {
    if let Some(s) = flag {
        return Ok(s.to_string());
    }
    if let Some(s) = home.current_session() {
        return Ok(s);
    }
    if let Ok(s) = std::env::var("PLANLOOP_SESSION") {
        if !s.is_empty() {
            return Ok(s);
        }
    }
    Err(CliError::MalformedInput(
        "no session specified: pass --session, set current_session, or PLANLOOP_SESSION"
            .to_string(),
    ))
}

/// Resolve the calling agent's identity for lock metadata and queue
/// position lookups.
pub fn resolve_agent(flag: Option<&str>) -> String {
    if let Some(a) = flag {
        return a.to_string();
    }
    std::env::var("PLANLOOP_AGENT_NAME").unwrap_or_else(|_| DEFAULT_AGENT_NAME.to_string())
}

/// Build the session's on-disk paths, failing if the directory doesn't exist.
pub fn session_paths(home: &Home, session: &str) -> Result<SessionPaths, CliError> {
    let dir = home.session_dir(session);
    if !dir.join("state.json").exists() {
        return Err(CliError::NotFound(session.to_string()));
    }
    Ok(SessionPaths::new(dir))
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
