// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only builders shared across crates (enabled via the `test-support` feature).

use crate::now::Now;
use crate::session_state::{CURRENT_SCHEMA_VERSION, Environment, PromptMetadata, SessionState};
use chrono::{TimeZone, Utc};

/// Build a minimal, valid `SessionState` for a session id, with `now = idle`.
#[allow(clippy::unwrap_used)]
pub fn fresh_state(session: &str) -> SessionState {
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    SessionState {
        schema_version: CURRENT_SCHEMA_VERSION,
        version: 1,
        session: session.into(),
        name: session.to_string(),
        title: session.to_string(),
        purpose: String::new(),
        created_at: ts,
        last_updated_at: ts,
        project_root: "/tmp/project".to_string(),
        branch: None,
        prompts: PromptMetadata::default(),
        environment: Environment {
            os: "linux".to_string(),
            runtime_version: None,
            node: None,
        },
        tasks: Vec::new(),
        signals: Vec::new(),
        next_steps: Vec::new(),
        context_notes: Vec::new(),
        artifacts: Vec::new(),
        tags: Vec::new(),
        now: Now::idle(),
        done: false,
        final_summary: None,
    }
}
