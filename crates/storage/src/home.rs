// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of the per-user home root and the paths it owns.

use std::path::{Path, PathBuf};

/// Resolve the home root: `PLANLOOP_HOME` if set, else `~/.planloop`.
pub fn resolve_home() -> PathBuf {
    if let Ok(dir) = std::env::var("PLANLOOP_HOME") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".planloop")
}

/// The per-user home root and the paths it owns.
#[derive(Debug, Clone)]
pub struct Home {
    root: PathBuf,
}

impl Home {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve from the environment (see [`resolve_home`]).
    pub fn from_env() -> Self {
        Self::new(resolve_home())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join("index.json")
    }

    pub fn current_session_path(&self) -> PathBuf {
        self.root.join("current_session")
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    pub fn session_dir(&self, session: &str) -> PathBuf {
        self.sessions_dir().join(session)
    }

    /// Ensure the home root and sessions directory exist.
    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.sessions_dir())
    }

    /// Read the `current_session` pointer, if set and non-empty.
    pub fn current_session(&self) -> Option<String> {
        let content = std::fs::read_to_string(self.current_session_path()).ok()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Overwrite the `current_session` pointer.
    pub fn set_current_session(&self, session: &str) -> std::io::Result<()> {
        std::fs::write(self.current_session_path(), session)
    }
}

/// Paths owned exclusively by a single session directory.
#[derive(Debug, Clone)]
pub struct SessionPaths {
    dir: PathBuf,
}

impl SessionPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn state_path(&self) -> PathBuf {
        self.dir.join("state.json")
    }

    pub fn plan_path(&self) -> PathBuf {
        self.dir.join("PLAN.md")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(".lock")
    }

    pub fn lock_info_path(&self) -> PathBuf {
        self.dir.join(".lock_info")
    }

    pub fn lock_queue_dir(&self) -> PathBuf {
        self.dir.join(".lock_queue")
    }

    pub fn deadlock_path(&self) -> PathBuf {
        self.dir.join("deadlock.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.dir.join("logs").join("planloop.log")
    }

    pub fn jsonl_log_path(&self) -> PathBuf {
        self.dir.join("logs").join("planloop.jsonl")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.dir.join("logs")
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.lock_queue_dir())?;
        std::fs::create_dir_all(self.logs_dir())
    }
}

#[cfg(test)]
#[path = "home_tests.rs"]
mod tests;
