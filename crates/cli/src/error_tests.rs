// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    not_found = { CliError::NotFound("s1".to_string()), "not_found" },
    version_mismatch = {
        CliError::Update(UpdateError::VersionMismatch { seen: "1".to_string(), current: 2 }),
        "version_mismatch"
    },
    lock_timeout = {
        CliError::Lock(LockError::Timeout { held_by: "agent-a".to_string() }),
        "lock_timeout"
    },
    unknown_fields = { CliError::UnknownFields(vec!["foo".to_string()]), "unknown_fields" },
    plan_edit_blocked = { CliError::PlanEditBlocked, "plan_edit_blocked" },
    malformed_input = { CliError::MalformedInput("bad json".to_string()), "malformed_input" },
)]
fn code_matches_taxonomy(err: CliError, expected: &str) {
    assert_eq!(err.code(), expected);
}

#[test]
fn every_variant_exits_nonzero() {
    assert_eq!(CliError::NotFound("x".to_string()).exit_code(), 1);
    assert_eq!(CliError::PlanEditBlocked.exit_code(), 1);
}
