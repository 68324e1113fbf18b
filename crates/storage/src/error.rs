// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the storage layer.

use planloop_core::StateValidationError;
use thiserror::Error;

/// Errors raised while loading, validating, or persisting a session.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("state invariant violated: {0}")]
    Validation(#[from] StateValidationError),
    #[error("session {0} not found")]
    NotFound(String),
}

/// Errors raised while acquiring or releasing the per-session lock.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lock acquisition timed out, currently held by {held_by}")]
    Timeout { held_by: String },
}

/// Errors raised while loading or writing user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}
