// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Filesystem-backed storage for planloop sessions: home/config bootstrap,
//! atomic persistence, the session registry, the fair lock and its queue,
//! deadlock detection, and session logging.

pub mod config;
pub mod deadlock;
pub mod error;
pub mod home;
pub mod lock;
pub mod logging;
pub mod persist;
pub mod plan;
pub mod registry;
pub mod session;

pub use config::Config;
pub use deadlock::{
    check_deadlock, seed_tracker, DeadlockTracker, DEADLOCK_SIGNAL_ID, QUEUE_STALL_SIGNAL_ID,
};
pub use error::{ConfigError, LockError, PersistError};
pub use home::{resolve_home, Home, SessionPaths};
pub use lock::{acquire_lock, lock_info, queue_status, LockGuard, LockInfo, QueueEntry, QueueStatus};
pub use logging::{init_session_logging, LoggingGuards};
pub use persist::{load, save};
pub use plan::render_plan;
pub use registry::{find_entry, load_registry, upsert_registry_entry, RegistryEntry};
pub use session::{create_session, generate_session_id, NewSession};
