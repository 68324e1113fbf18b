// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shape of a client-submitted state update.

use crate::artifact::Artifact;
use crate::id::TaskId;
use crate::task::{TaskStatus, TaskType};
use serde::{Deserialize, Serialize};

/// A targeted change to one existing task's status and/or title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusPatch {
    pub id: TaskId,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub new_title: Option<String>,
}

/// A brand-new task to append to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTaskInput {
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<TaskType>,
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
    #[serde(default)]
    pub implementation_notes: Option<String>,
}

/// A broader edit to an existing task (title, type, and/or status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub id: TaskId,
    #[serde(default)]
    pub new_title: Option<String>,
    #[serde(default)]
    pub new_type: Option<TaskType>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Identifying metadata about the agent submitting an update, informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

/// One optimistic-concurrency version token, accepted as either a JSON
/// string or number on the wire and normalized to a string for comparison
/// against `SessionState::version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionToken(pub String);

impl<'de> Deserialize<'de> for VersionToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            Num(u64),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Str(s) => VersionToken(s),
            Repr::Num(n) => VersionToken(n.to_string()),
        })
    }
}

impl Serialize for VersionToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A client-submitted batch of changes to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePayload {
    pub session: String,
    #[serde(default)]
    pub last_seen_version: Option<VersionToken>,
    #[serde(default)]
    pub tasks: Vec<TaskStatusPatch>,
    #[serde(default)]
    pub add_tasks: Vec<AddTaskInput>,
    #[serde(default)]
    pub update_tasks: Vec<UpdateTaskInput>,
    #[serde(default)]
    pub context_notes: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
    #[serde(default)]
    pub agent: Option<AgentInfo>,
    #[serde(default)]
    pub final_summary: Option<String>,
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
#[path = "update_payload_tests.rs"]
mod tests;
