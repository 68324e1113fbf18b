// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic persistence of session state and its derived plan document.

use crate::error::PersistError;
use crate::home::{Home, SessionPaths};
use crate::plan::render_plan;
use crate::registry::{upsert_registry_entry, RegistryEntry};
use planloop_core::{validate, Clock, SessionState};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `content` to `path` atomically: write to a sibling `.tmp` file,
/// `fsync`, then rename over the destination.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load and validate a session's state from disk.
pub fn load(paths: &SessionPaths) -> Result<SessionState, PersistError> {
    let content = std::fs::read_to_string(paths.state_path())
        .map_err(|_| PersistError::NotFound(paths.dir().display().to_string()))?;
    let state: SessionState = serde_json::from_str(&content)?;
    validate(&state)?;
    Ok(state)
}

/// Revalidate, bump `last_updated_at`, and atomically persist `state`,
/// its rendered plan document, and the home registry entry.
///
/// Failure at any step leaves the prior on-disk state intact: each write
/// goes through `write .tmp` + `rename`, so a crash mid-write never
/// produces a torn file.
pub fn save(
    home: &Home,
    paths: &SessionPaths,
    state: &mut SessionState,
    clock: &dyn Clock,
) -> Result<(), PersistError> {
    validate(state)?;
    state.last_updated_at = clock.now();

    let json = serde_json::to_vec_pretty(state)?;
    atomic_write(&paths.state_path(), &json)?;

    let plan = render_plan(state);
    atomic_write(&paths.plan_path(), plan.as_bytes())?;

    upsert_registry_entry(home, RegistryEntry::from_state(state))?;

    Ok(())
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
