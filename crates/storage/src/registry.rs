// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The home-level index mapping session id to a summary record.

use crate::error::PersistError;
use crate::home::Home;
use crate::persist::atomic_write;
use chrono::{DateTime, Utc};
use planloop_core::SessionState;
use serde::{Deserialize, Serialize};

/// One row of the session registry (`<home>/index.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub session: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub project_root: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    pub done: bool,
}

impl RegistryEntry {
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            session: state.session.as_str().to_string(),
            name: state.name.clone(),
            title: state.title.clone(),
            tags: state.tags.clone(),
            project_root: state.project_root.clone(),
            created_at: state.created_at,
            last_updated_at: state.last_updated_at,
            done: state.done,
        }
    }
}

/// Load the full registry, or an empty one if `index.json` doesn't exist yet.
pub fn load_registry(home: &Home) -> Result<Vec<RegistryEntry>, PersistError> {
    match std::fs::read_to_string(home.registry_path()) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

/// Insert or replace the entry for `entry.session`, then persist atomically.
pub fn upsert_registry_entry(home: &Home, entry: RegistryEntry) -> Result<(), PersistError> {
    let mut entries = load_registry(home)?;
    match entries.iter_mut().find(|e| e.session == entry.session) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
    let json = serde_json::to_vec_pretty(&entries)?;
    atomic_write(&home.registry_path(), &json)?;
    Ok(())
}

/// Look up a single registry entry by session id.
pub fn find_entry(home: &Home, session: &str) -> Result<Option<RegistryEntry>, PersistError> {
    Ok(load_registry(home)?.into_iter().find(|e| e.session == session))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
