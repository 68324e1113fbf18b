// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn all_scenarios_pass() {
    let out = run();
    assert_eq!(out["status"], "ok", "selftest output: {out}");
    let scenarios = out["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 4);
    for scenario in scenarios {
        assert_eq!(scenario["status"], "passed", "scenario: {scenario}");
    }
}

#[test]
fn scenario_names_match_spec() {
    let out = run();
    let names: Vec<&str> = out["scenarios"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["clean_run", "ci_blocker", "dependency_chain", "signal_and_tasks"]);
}
