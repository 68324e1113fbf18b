// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `describe`: a static, self-contained reference for agents integrating
//! against the CLI — state/update shapes, enum values, and error codes.
//! Grounded in the original's `describe_payload`, with the empty
//! `error_codes` list replaced by the CLI's real taxonomy and a
//! `usage_hints` field added for agents bootstrapping cold.

use serde_json::{json, Value};

pub fn run() -> Value {
    json!({
        "state_schema": state_schema(),
        "update_schema": update_schema(),
        "enums": enum_reference(),
        "error_codes": error_codes(),
        "usage_hints": usage_hints(),
    })
}

fn state_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "session": { "type": "string" },
            "title": { "type": "string" },
            "purpose": { "type": "string" },
            "version": { "type": "integer", "minimum": 0 },
            "created_at": { "type": "string", "format": "date-time" },
            "last_updated_at": { "type": "string", "format": "date-time" },
            "environment": {
                "type": "object",
                "properties": {
                    "project_root": { "type": "string" },
                    "branch": { "type": ["string", "null"] }
                },
                "required": ["project_root"]
            },
            "now": { "$ref": "#/definitions/now" },
            "tasks": { "type": "array", "items": { "$ref": "#/definitions/task" } },
            "signals": { "type": "array", "items": { "$ref": "#/definitions/signal" } },
            "artifacts": { "type": "array", "items": { "$ref": "#/definitions/artifact" } },
            "context_notes": { "type": "array", "items": { "type": "string" } },
            "next_steps": { "type": "array", "items": { "type": "string" } },
            "final_summary": { "type": ["string", "null"] }
        },
        "required": ["session", "version", "now", "tasks", "signals"],
        "definitions": {
            "now": {
                "type": "object",
                "properties": {
                    "reason": { "enum": now_reasons() },
                    "task_id": { "type": ["integer", "null"] },
                    "signal_id": { "type": ["string", "null"] }
                },
                "required": ["reason"]
            },
            "task": {
                "type": "object",
                "properties": {
                    "id": { "type": "integer" },
                    "title": { "type": "string" },
                    "type": { "enum": task_types() },
                    "status": { "enum": task_statuses() },
                    "depends_on": { "type": "array", "items": { "type": "integer" } }
                },
                "required": ["id", "title", "type", "status"]
            },
            "signal": {
                "type": "object",
                "properties": {
                    "id": { "type": "string" },
                    "type": { "enum": signal_types() },
                    "kind": { "type": "string" },
                    "level": { "enum": signal_levels() },
                    "open": { "type": "boolean" },
                    "title": { "type": "string" },
                    "message": { "type": "string" },
                    "link": { "type": ["string", "null"] }
                },
                "required": ["id", "type", "kind", "level", "title", "message"]
            },
            "artifact": {
                "type": "object",
                "properties": {
                    "type": { "enum": artifact_types() },
                    "path": { "type": ["string", "null"] },
                    "summary": { "type": "string" },
                    "commit_sha": { "type": ["string", "null"] }
                },
                "required": ["type", "summary"]
            }
        }
    })
}

fn update_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "session": { "type": "string" },
            "last_seen_version": { "type": ["integer", "string"] },
            "tasks": {
                "type": "array",
                "description": "Status-only transitions keyed by task id.",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "status": { "enum": task_statuses() }
                    },
                    "required": ["id", "status"]
                }
            },
            "add_tasks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "type": { "enum": task_types() },
                        "depends_on": { "type": "array", "items": { "type": "integer" } }
                    },
                    "required": ["title"]
                }
            },
            "update_tasks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "integer" },
                        "title": { "type": ["string", "null"] },
                        "type": { "enum": task_types() },
                        "depends_on": { "type": ["array", "null"], "items": { "type": "integer" } }
                    },
                    "required": ["id"]
                }
            },
            "context_notes": { "type": "array", "items": { "type": "string" } },
            "next_steps": { "type": "array", "items": { "type": "string" } },
            "artifacts": { "type": "array", "items": { "$ref": "#/definitions/artifact" } },
            "agent": { "type": ["string", "null"] },
            "final_summary": { "type": ["string", "null"] },
            "done": { "type": "boolean" }
        },
        "required": ["session"]
    })
}

fn enum_reference() -> Value {
    json!({
        "task_types": task_types(),
        "task_statuses": task_statuses(),
        "signal_levels": signal_levels(),
        "signal_types": signal_types(),
        "artifact_types": artifact_types(),
        "now_reasons": now_reasons(),
    })
}

fn task_types() -> Vec<&'static str> {
    vec!["test", "fix", "refactor", "feature", "doc", "chore", "design", "investigate"]
}

fn task_statuses() -> Vec<&'static str> {
    vec![
        "TODO", "IN_PROGRESS", "DONE", "BLOCKED", "SKIPPED", "OUT_OF_SCOPE", "CANCELLED",
        "FAILED", "WAITING",
    ]
}

fn signal_levels() -> Vec<&'static str> {
    vec!["blocker", "high", "info"]
}

fn signal_types() -> Vec<&'static str> {
    vec!["ci", "lint", "bench", "system", "other"]
}

fn artifact_types() -> Vec<&'static str> {
    vec!["diff", "log", "file", "url", "other"]
}

fn now_reasons() -> Vec<&'static str> {
    vec![
        "ci_blocker", "task", "completed", "idle", "waiting_on_lock", "deadlocked", "escalated",
    ]
}

/// Every `CliError::code()` value a caller might see, so agents can branch
/// on error kind without reverse-engineering it from messages.
fn error_codes() -> Vec<&'static str> {
    vec![
        "not_found",
        "validation_error",
        "version_mismatch",
        "signal_error",
        "lock_timeout",
        "unknown_fields",
        "plan_edit_blocked",
        "malformed_input",
    ]
}

fn usage_hints() -> Value {
    json!([
        "Call `status` first; it returns `now`, which names the single action to take next.",
        "Pass `last_seen_version` on every `update` so concurrent writers are rejected, not silently merged.",
        "Close a blocker signal before the scheduler will return a `task` reason again.",
        "Use `--dry-run` on `update` to preview a diff before committing a mutation.",
    ])
}

#[cfg(test)]
#[path = "describe_tests.rs"]
mod tests;
