// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User configuration, loaded once from `<home>/config.toml`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafeModeConfig {
    pub dry_run: bool,
    pub no_plan_edit: bool,
    pub strict: bool,
}

impl Default for SafeModeConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            no_plan_edit: false,
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub timeout_secs: u64,
    pub sleep_interval_ms: u64,
    pub stale_entry_secs: u64,
    pub stall_threshold: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            sleep_interval_ms: 100,
            stale_entry_secs: 30,
            stall_threshold: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlockConfig {
    pub threshold: u32,
}

impl Default for DeadlockConfig {
    fn default() -> Self {
        Self { threshold: 10 }
    }
}

/// User configuration resolved from `<home>/config.toml`, with defaults
/// used for any field (or the whole file) that is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub safe_mode: SafeModeConfig,
    pub logging: LoggingConfig,
    pub lock: LockConfig,
    pub deadlock: DeadlockConfig,
}

impl Config {
    /// Load from `path`, returning defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write defaults to `path` if no config file exists yet.
    ///
    /// Mirrors the home bootstrap writing a starter config on first run.
    pub fn bootstrap(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
