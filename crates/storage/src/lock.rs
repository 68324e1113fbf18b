// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-session fair FIFO lock and its waiting queue.
//!
//! `.lock`'s exclusive create is the acquisition primitive; `.lock_queue/`
//! holds one JSON file per waiter so head-of-queue is always checked
//! before attempting the create, which is what gives the queue fairness.

use crate::config::LockConfig;
use crate::deadlock::{DeadlockTracker, QUEUE_STALL_SIGNAL_ID};
use crate::error::{LockError, PersistError};
use crate::home::{Home, SessionPaths};
use chrono::{DateTime, Utc};
use planloop_core::{Clock, Now, Signal, SignalLevel, SignalType};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// One waiter's position in the fair lock queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: String,
    pub agent: String,
    pub operation: String,
    pub requested_at: DateTime<Utc>,
}

/// The contents of the sidecar `.lock_info` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    pub held_by: String,
    pub since: DateTime<Utc>,
    pub operation: String,
}

/// A pending agent's position relative to other waiters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub pending: Vec<QueueEntry>,
    pub position: Option<usize>,
}

fn queue_entry_path(paths: &SessionPaths, id: &str) -> std::path::PathBuf {
    paths.lock_queue_dir().join(format!("{id}.json"))
}

fn write_queue_entry(paths: &SessionPaths, entry: &QueueEntry) -> io::Result<()> {
    fs::create_dir_all(paths.lock_queue_dir())?;
    let json = serde_json::to_vec_pretty(entry)?;
    fs::write(queue_entry_path(paths, &entry.id), json)
}

/// Load all queue entries, pruning (and deleting) any older than
/// `stale_entry_secs`. Returned in `requested_at` order.
pub fn load_queue(paths: &SessionPaths, stale_entry_secs: u64, clock: &dyn Clock) -> io::Result<Vec<QueueEntry>> {
    let dir = paths.lock_queue_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut entries = Vec::new();
    for dirent in fs::read_dir(&dir)? {
        let path = dirent?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        let Ok(entry) = serde_json::from_str::<QueueEntry>(&content) else {
            continue;
        };
        let age = (clock.now() - entry.requested_at).num_seconds().max(0) as u64;
        if age > stale_entry_secs {
            let _ = fs::remove_file(&path);
            warn!(entry = %entry.id, agent = %entry.agent, age_secs = age, "queue_entry_pruned");
            continue;
        }
        entries.push(entry);
    }
    entries.sort_by_key(|e| e.requested_at);
    Ok(entries)
}

/// Return the pending queue with the 1-based position of `viewer_agent`, if present.
pub fn queue_status(
    paths: &SessionPaths,
    stale_entry_secs: u64,
    viewer_agent: &str,
    clock: &dyn Clock,
) -> io::Result<QueueStatus> {
    let pending = load_queue(paths, stale_entry_secs, clock)?;
    let position = pending.iter().position(|e| e.agent == viewer_agent).map(|i| i + 1);
    Ok(QueueStatus { pending, position })
}

fn try_create_lock(path: &Path) -> io::Result<Option<File>> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(e),
    }
}

fn read_lock_info(paths: &SessionPaths) -> Option<LockInfo> {
    let content = fs::read_to_string(paths.lock_info_path()).ok()?;
    serde_json::from_str(&content).ok()
}

/// Read the current `.lock_info` sidecar, if the session is presently locked.
pub fn lock_info(paths: &SessionPaths) -> Option<LockInfo> {
    read_lock_info(paths)
}

/// An acquired lock. Releasing (deleting `.lock`, `.lock_info`, and the
/// caller's queue entry) happens when this guard is dropped.
pub struct LockGuard<'a> {
    paths: &'a SessionPaths,
    entry_id: String,
    acquired_at: DateTime<Utc>,
    agent: String,
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        let _ = fs::remove_file(self.paths.lock_path());
        let _ = fs::remove_file(self.paths.lock_info_path());
        let _ = fs::remove_file(queue_entry_path(self.paths, &self.entry_id));
        info!(
            agent = %self.agent,
            entry = %self.entry_id,
            hold_ms = (Utc::now() - self.acquired_at).num_milliseconds(),
            "lock_released"
        );
    }
}

/// Acquire the session's fair lock for `agent`/`operation`, blocking (via
/// polling sleep) until acquired or `config.timeout_secs` elapses.
///
/// On each scan where this caller is not the queue head and more than one
/// entry is pending, bumps the session's queue-stall counter; crossing
/// `config.stall_threshold` raises a synthetic `queue_stall` blocker via a
/// one-shot load/modify/save that runs outside this lock's critical
/// section (the head has not changed, so it cannot itself deadlock).
pub fn acquire_lock<'a>(
    home: &Home,
    paths: &'a SessionPaths,
    agent: &str,
    operation: &str,
    config: &LockConfig,
    clock: &dyn Clock,
) -> Result<LockGuard<'a>, LockError> {
    paths.ensure()?;
    let my_entry = QueueEntry {
        id: Uuid::new_v4().to_string(),
        agent: agent.to_string(),
        operation: operation.to_string(),
        requested_at: clock.now(),
    };
    write_queue_entry(paths, &my_entry)?;

    let deadline = clock.now() + chrono::Duration::seconds(config.timeout_secs as i64);
    info!(agent = %agent, entry = %my_entry.id, "lock_requested");

    loop {
        let queue = load_queue(paths, config.stale_entry_secs, clock)?;
        let head = queue.first();
        let i_am_head = head.is_some_and(|h| h.id == my_entry.id);

        if i_am_head {
            if let Some(file) = try_create_lock(&paths.lock_path())? {
                drop(file);
                let info_json = serde_json::to_vec_pretty(&LockInfo {
                    held_by: agent.to_string(),
                    since: clock.now(),
                    operation: operation.to_string(),
                })?;
                fs::write(paths.lock_info_path(), info_json)?;
                info!(
                    agent = %agent,
                    entry = %my_entry.id,
                    wait_ms = (clock.now() - my_entry.requested_at).num_milliseconds(),
                    "lock_acquired"
                );
                return Ok(LockGuard {
                    paths,
                    entry_id: my_entry.id,
                    acquired_at: clock.now(),
                    agent: agent.to_string(),
                });
            }
        } else {
            maybe_escalate_queue_stall(home, paths, head, queue.len(), config, clock);
        }

        if clock.now() >= deadline {
            let _ = fs::remove_file(queue_entry_path(paths, &my_entry.id));
            let held_by = read_lock_info(paths).map_or_else(|| "unknown".to_string(), |i| i.held_by);
            warn!(agent = %agent, entry = %my_entry.id, held_by = %held_by, "lock_timeout");
            return Err(LockError::Timeout { held_by });
        }
        thread::sleep(Duration::from_millis(config.sleep_interval_ms));
    }
}

fn maybe_escalate_queue_stall(
    home: &Home,
    paths: &SessionPaths,
    head: Option<&QueueEntry>,
    queue_len: usize,
    config: &LockConfig,
    clock: &dyn Clock,
) {
    let should_track = queue_len > 1;
    let head_agent = head.map(|h| h.agent.as_str());

    let mut tracker = match DeadlockTracker::load(&paths.deadlock_path()) {
        Ok(t) => t,
        Err(_) => return,
    };
    let escalate = tracker.register_queue_head(head_agent, should_track, config.stall_threshold);
    let _ = tracker.persist(&paths.deadlock_path());

    if escalate {
        let _ = emit_queue_stall_signal(home, paths, clock);
    }
}

/// One-shot load/modify/save that appends an idempotent `queue_stall`
/// blocker outside the acquisition critical section.
fn emit_queue_stall_signal(
    home: &Home,
    paths: &SessionPaths,
    clock: &dyn Clock,
) -> Result<(), PersistError> {
    let mut state = crate::persist::load(paths)?;
    if state.signal(&QUEUE_STALL_SIGNAL_ID.into()).is_none() {
        state.signals.push(Signal::new(
            QUEUE_STALL_SIGNAL_ID,
            SignalType::System,
            "queue_stall",
            SignalLevel::Blocker,
            "Lock queue appears stalled",
            "The head of the lock queue has not advanced",
        ));
    }
    state.now = Now::waiting_on_lock(Some(QUEUE_STALL_SIGNAL_ID.into()));
    crate::persist::save(home, paths, &mut state, clock)?;
    warn!(session = %state.session, "queue_stall_escalated");
    Ok(())
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
