// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single-action descriptor handed to an agent on each poll.

use crate::id::{SignalId, TaskId};
use serde::{Deserialize, Serialize};

/// Why the coordinator chose the current `Now` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NowReason {
    CiBlocker,
    Task,
    Completed,
    Idle,
    WaitingOnLock,
    Deadlocked,
    Escalated,
}

impl NowReason {
    /// Reasons that are write-time overrides applied by the lock/deadlock
    /// subsystems after `compute_now` ran, rather than a pure function of
    /// task/signal state. The validator's stored-equals-computed check is
    /// relaxed specifically for these three (spec.md §9).
    pub fn is_override(&self) -> bool {
        matches!(
            self,
            NowReason::WaitingOnLock | NowReason::Deadlocked | NowReason::Escalated
        )
    }
}

/// Derived descriptor describing what an agent should do next.
///
/// Never supplied as update input; always recomputed by [`crate::scheduler::compute_now`]
/// or overridden by the lock/deadlock subsystems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Now {
    pub reason: NowReason,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub signal_id: Option<SignalId>,
}

impl Now {
    pub fn idle() -> Self {
        Self {
            reason: NowReason::Idle,
            task_id: None,
            signal_id: None,
        }
    }

    pub fn task(task_id: TaskId) -> Self {
        Self {
            reason: NowReason::Task,
            task_id: Some(task_id),
            signal_id: None,
        }
    }

    pub fn ci_blocker(signal_id: SignalId) -> Self {
        Self {
            reason: NowReason::CiBlocker,
            task_id: None,
            signal_id: Some(signal_id),
        }
    }

    pub fn completed() -> Self {
        Self {
            reason: NowReason::Completed,
            task_id: None,
            signal_id: None,
        }
    }

    pub fn waiting_on_lock(signal_id: Option<SignalId>) -> Self {
        Self {
            reason: NowReason::WaitingOnLock,
            task_id: None,
            signal_id,
        }
    }

    pub fn deadlocked(signal_id: SignalId) -> Self {
        Self {
            reason: NowReason::Deadlocked,
            task_id: None,
            signal_id: Some(signal_id),
        }
    }
}

#[cfg(test)]
#[path = "now_tests.rs"]
mod tests;
