// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identity, type, and status.

use crate::id::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Test,
    Fix,
    Refactor,
    Feature,
    Doc,
    Chore,
    Design,
    Investigate,
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::Feature
    }
}

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Blocked,
    Skipped,
    OutOfScope,
    Cancelled,
    Failed,
    Waiting,
}

impl TaskStatus {
    /// Terminal states: DONE/CANCELLED/FAILED/SKIPPED/OUT_OF_SCOPE.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Done
                | TaskStatus::Cancelled
                | TaskStatus::Failed
                | TaskStatus::Skipped
                | TaskStatus::OutOfScope
        )
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// A unit of work with a typed status and dependency edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TaskType,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
    #[serde(default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
    /// Free-form notes supplied when a task is created via `add_tasks`.
    #[serde(default)]
    pub implementation_notes: Option<String>,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>, kind: TaskType) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            status: TaskStatus::Todo,
            depends_on: Vec::new(),
            commit_sha: None,
            last_updated_at: None,
            implementation_notes: None,
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
