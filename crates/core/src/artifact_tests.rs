// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn artifact_type_field_name_on_wire() {
    let artifact = Artifact {
        artifact_type: ArtifactType::Diff,
        path: Some("patch.diff".to_string()),
        summary: "changed foo.rs".to_string(),
        commit_sha: None,
        metadata: std::collections::HashMap::new(),
    };
    let json = serde_json::to_value(&artifact).unwrap();
    assert_eq!(json["type"], "diff");
    assert!(json.get("artifact_type").is_none());
}

#[test]
fn artifact_without_path_or_commit_deserializes() {
    let json = serde_json::json!({
        "type": "url",
        "summary": "see ticket",
    });
    let artifact: Artifact = serde_json::from_value(json).unwrap();
    assert_eq!(artifact.artifact_type, ArtifactType::Url);
    assert_eq!(artifact.path, None);
    assert_eq!(artifact.commit_sha, None);
}
