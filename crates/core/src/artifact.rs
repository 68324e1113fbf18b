// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifacts produced by an agent while working a session.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactType {
    Diff,
    Log,
    File,
    Url,
    Other,
}

/// Evidence of work attached to a session (a diff, a log excerpt, a file, a link).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    #[serde(default)]
    pub path: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
