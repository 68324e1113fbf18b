// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The root aggregate persisted per session.

use crate::artifact::Artifact;
use crate::id::SessionId;
use crate::now::Now;
use crate::signal::Signal;
use crate::task::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The schema version this crate knows how to read and write.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Coarse fingerprint of the environment a session is running in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub os: String,
    #[serde(default)]
    pub runtime_version: Option<String>,
    #[serde(default)]
    pub node: Option<String>,
}

/// Which prompt/handshake template set a session was created under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMetadata {
    pub set: String,
    #[serde(default)]
    pub goal_version: Option<String>,
    #[serde(default)]
    pub handshake_version: Option<String>,
    #[serde(default)]
    pub summary_version: Option<String>,
}

impl Default for PromptMetadata {
    fn default() -> Self {
        Self {
            set: "core-v1".to_string(),
            goal_version: None,
            handshake_version: None,
            summary_version: None,
        }
    }
}

/// Root aggregate for one logical agent workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub version: u64,
    pub session: SessionId,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub purpose: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    pub project_root: String,
    #[serde(default)]
    pub branch: Option<String>,
    pub prompts: PromptMetadata,
    pub environment: Environment,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub context_notes: Vec<String>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub now: Now,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub final_summary: Option<String>,
}

fn default_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

impl SessionState {
    /// Look up a task by id.
    pub fn task(&self, id: crate::id::TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: crate::id::TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn signal(&self, id: &crate::id::SignalId) -> Option<&Signal> {
        self.signals.iter().find(|s| &s.id == id)
    }

    pub fn signal_mut(&mut self, id: &crate::id::SignalId) -> Option<&mut Signal> {
        self.signals.iter_mut().find(|s| &s.id == id)
    }
}

#[cfg(test)]
#[path = "session_state_tests.rs"]
mod tests;
