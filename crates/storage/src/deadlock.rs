// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deadlock/livelock detection: no-progress and queue-stall tracking.

use crate::error::PersistError;
use crate::home::SessionPaths;
use planloop_core::{Now, Signal, SignalLevel, SignalType};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

pub const DEADLOCK_SIGNAL_ID: &str = "deadlock";
pub const QUEUE_STALL_SIGNAL_ID: &str = "queue_stall";

/// Persisted between calls so counters survive process restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeadlockTracker {
    #[serde(default)]
    pub last_state_hash: String,
    #[serde(default)]
    pub no_progress_counter: u32,
    #[serde(default)]
    pub queue_head: Option<String>,
    #[serde(default)]
    pub queue_stall_counter: u32,
}

impl DeadlockTracker {
    pub fn load(path: &Path) -> Result<Self, PersistError> {
        match std::fs::read_to_string(path) {
            Ok(content) if !content.trim().is_empty() => Ok(serde_json::from_str(&content)?),
            Ok(_) => Ok(Self::default()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn persist(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_vec_pretty(self)?;
        crate::persist::atomic_write(path, &json)?;
        Ok(())
    }

    /// Register the current queue head; returns true once `threshold` is crossed.
    ///
    /// A distinct head resets the stall counter. Not tracking (empty queue,
    /// or this caller is the head) clears the counter to zero.
    pub fn register_queue_head(
        &mut self,
        head_agent: Option<&str>,
        should_track: bool,
        threshold: u32,
    ) -> bool {
        let Some(head) = head_agent.filter(|_| should_track) else {
            self.queue_head = None;
            self.queue_stall_counter = 0;
            return false;
        };

        if self.queue_head.as_deref() != Some(head) {
            self.queue_head = Some(head.to_string());
            self.queue_stall_counter = 1;
        } else {
            self.queue_stall_counter += 1;
        }

        self.queue_stall_counter >= threshold
    }
}

fn hash_state_json(state: &planloop_core::SessionState) -> Result<String, PersistError> {
    let mut without_timestamp = state.clone();
    without_timestamp.last_updated_at = without_timestamp.created_at;
    let payload = serde_json::to_vec(&without_timestamp)?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(format!("{:x}", hasher.finalize()))
}

/// A tracker seeded with `state`'s own hash, so the first `status` call
/// against a brand-new session already has a baseline to compare against —
/// without this, that first call would always see a hash change (default
/// vs. real) and spend itself resetting the counter instead of advancing
/// it, pushing the threshold out by one call.
pub fn seed_tracker(state: &planloop_core::SessionState) -> Result<DeadlockTracker, PersistError> {
    Ok(DeadlockTracker {
        last_state_hash: hash_state_json(state)?,
        no_progress_counter: 0,
        queue_head: None,
        queue_stall_counter: 0,
    })
}

fn deadlock_signal() -> Signal {
    Signal::new(
        DEADLOCK_SIGNAL_ID,
        SignalType::System,
        "deadlock_suspected",
        SignalLevel::Blocker,
        "Potential deadlock detected",
        "Agent called status without making progress",
    )
}

/// Hash `state` (excluding `last_updated_at`) and compare to the tracker's
/// previous hash. On `threshold` consecutive unchanged hashes, appends an
/// idempotent `deadlock_suspected` blocker signal and overrides `now`.
/// Callers should seed a brand-new session's tracker with [`seed_tracker`]
/// first, so the session's very first `status` call already has a real
/// baseline to compare against rather than spending itself on a guaranteed
/// mismatch against the tracker's empty default.
pub fn check_deadlock(
    paths: &SessionPaths,
    state: &mut planloop_core::SessionState,
    threshold: u32,
) -> Result<(), PersistError> {
    let mut tracker = DeadlockTracker::load(&paths.deadlock_path())?;
    let hash = hash_state_json(state)?;

    if hash == tracker.last_state_hash {
        tracker.no_progress_counter += 1;
    } else {
        tracker.last_state_hash = hash;
        tracker.no_progress_counter = 0;
    }

    if tracker.no_progress_counter >= threshold {
        if state.signal(&DEADLOCK_SIGNAL_ID.into()).is_none() {
            state.signals.push(deadlock_signal());
        }
        state.now = Now::deadlocked(DEADLOCK_SIGNAL_ID.into());
    }

    tracker.persist(&paths.deadlock_path())?;
    Ok(())
}

#[cfg(test)]
#[path = "deadlock_tests.rs"]
mod tests;
