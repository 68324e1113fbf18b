// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The CLI's error taxonomy, mapping 1:1 to spec.md §7's error kinds.
//!
//! Every variant here either wraps a lower-layer `thiserror` type or names
//! one of the CLI-specific kinds (`NotFound`, `UnknownFields`,
//! `PlanEditBlocked`, `MalformedInput`) that only make sense once a payload
//! has reached the command layer.

use planloop_core::{SignalError, StateValidationError, UpdateError};
use planloop_storage::{ConfigError, LockError, PersistError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("session {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] StateValidationError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("payload contains unrecognized field(s): {}", .0.join(", "))]
    UnknownFields(Vec<String>),

    #[error("update rejected by no_plan_edit: payload would mutate plan structure")]
    PlanEditBlocked,

    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl CliError {
    /// Every error maps to exit code 1 (spec.md §6.5); the only 0 path is
    /// a command returning `Ok`.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// The stable error-kind tag `describe`'s `error_codes` enumerates.
    pub fn code(&self) -> &'static str {
        match self {
            CliError::NotFound(_) => "not_found",
            CliError::Validation(_) => "validation_error",
            CliError::Update(UpdateError::VersionMismatch { .. }) => "version_mismatch",
            CliError::Update(_) => "validation_error",
            CliError::Signal(_) => "signal_error",
            CliError::Persist(PersistError::NotFound(_)) => "not_found",
            CliError::Persist(PersistError::Validation(_)) => "validation_error",
            CliError::Persist(_) => "malformed_input",
            CliError::Lock(LockError::Timeout { .. }) => "lock_timeout",
            CliError::Lock(_) => "malformed_input",
            CliError::Config(_) => "malformed_input",
            CliError::UnknownFields(_) => "unknown_fields",
            CliError::PlanEditBlocked => "plan_edit_blocked",
            CliError::MalformedInput(_) => "malformed_input",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
