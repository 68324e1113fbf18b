// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `selftest`: a scripted agent workflow run end-to-end inside a disposable
//! home, to catch coordinator regressions without needing a live agent.
//! Scenarios are ported from the original's `_scenario_*` harness, plus one
//! (`signal_and_tasks`) added to exercise a blocker interleaved with a
//! multi-task plan.

use planloop_core::update_payload::VersionToken;
use planloop_core::{
    apply_update, close_signal, open_signal, validate, AddTaskInput, Environment, NowReason,
    Signal, SignalLevel, SignalType, SystemClock, TaskStatus, TaskStatusPatch, TaskType,
    UpdatePayload,
};
use planloop_storage::{create_session, save, Home, NewSession, SessionPaths};
use serde_json::{json, Value};
use tempfile::tempdir;

type Scenario = fn() -> Result<String, String>;

const SCENARIOS: &[(&str, Scenario)] = &[
    ("clean_run", scenario_clean_run),
    ("ci_blocker", scenario_ci_blocker),
    ("dependency_chain", scenario_dependency_chain),
    ("signal_and_tasks", scenario_signal_and_tasks),
];

pub fn run() -> Value {
    let mut all_passed = true;
    let results: Vec<Value> = SCENARIOS
        .iter()
        .map(|(name, scenario)| match scenario() {
            Ok(detail) => json!({ "name": name, "status": "passed", "detail": detail }),
            Err(detail) => {
                all_passed = false;
                json!({ "name": name, "status": "failed", "detail": detail })
            }
        })
        .collect();

    json!({
        "status": if all_passed { "ok" } else { "failed" },
        "scenarios": results,
    })
}

fn new_home() -> Result<(tempfile::TempDir, Home), String> {
    let dir = tempdir().map_err(|e| format!("cannot create selftest home: {e}"))?;
    let home = Home::new(dir.path());
    home.ensure().map_err(|e| format!("cannot initialize selftest home: {e}"))?;
    Ok((dir, home))
}

fn new_payload(session: &str, version: u64) -> UpdatePayload {
    UpdatePayload {
        session: session.to_string(),
        last_seen_version: Some(VersionToken(version.to_string())),
        tasks: Vec::new(),
        add_tasks: Vec::new(),
        update_tasks: Vec::new(),
        context_notes: Vec::new(),
        next_steps: Vec::new(),
        artifacts: Vec::new(),
        agent: None,
        final_summary: None,
        done: false,
    }
}

fn scenario_clean_run() -> Result<String, String> {
    let (_dir, home) = new_home()?;
    let clock = SystemClock;
    let mut state = create_session(
        &home,
        NewSession {
            name: "Selftest Clean",
            title: "Selftest Clean",
            purpose: "UI polish",
            project_root: "/selftest/clean",
            branch: None,
            environment: Environment::default(),
        },
        &clock,
    )
    .map_err(|e| e.to_string())?;
    let paths = SessionPaths::new(home.session_dir(state.session.as_str()));

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.add_tasks = vec![
        AddTaskInput { title: "Add button".to_string(), kind: Some(TaskType::Feature), depends_on: Vec::new(), implementation_notes: None },
        AddTaskInput { title: "Write docs".to_string(), kind: Some(TaskType::Doc), depends_on: Vec::new(), implementation_notes: None },
    ];
    payload.context_notes = vec!["Clean scenario initialized".to_string()];
    payload.next_steps = vec!["Finish both tasks".to_string()];
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.tasks = vec![
        TaskStatusPatch { id: 1.into(), status: Some(TaskStatus::Done), new_title: None },
        TaskStatusPatch { id: 2.into(), status: Some(TaskStatus::Done), new_title: None },
    ];
    payload.final_summary = Some("UI polish complete".to_string());
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;

    if state.now.reason != NowReason::Completed {
        return Err("expected clean scenario to complete".to_string());
    }
    Ok("Clean scenario completed with final summary".to_string())
}

fn scenario_ci_blocker() -> Result<String, String> {
    let (_dir, home) = new_home()?;
    let clock = SystemClock;
    let mut state = create_session(
        &home,
        NewSession {
            name: "Selftest CI",
            title: "Selftest CI",
            purpose: "Crash fix",
            project_root: "/selftest/ci",
            branch: None,
            environment: Environment::default(),
        },
        &clock,
    )
    .map_err(|e| e.to_string())?;
    let paths = SessionPaths::new(home.session_dir(state.session.as_str()));

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.add_tasks = vec![AddTaskInput {
        title: "Fix failing test".to_string(),
        kind: Some(TaskType::Fix),
        depends_on: Vec::new(),
        implementation_notes: None,
    }];
    payload.context_notes = vec!["CI scenario bootstrapped".to_string()];
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;

    let signal = Signal::new(
        "ci-selftest",
        SignalType::Ci,
        "build",
        SignalLevel::Blocker,
        "Selftest CI failure",
        "Simulated CI breakage",
    );
    open_signal(&mut state, signal, &clock).map_err(|e| e.to_string())?;
    validate(&state).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.reason != NowReason::CiBlocker {
        return Err("expected now.reason to reflect ci_blocker".to_string());
    }

    close_signal(&mut state, &planloop_core::SignalId::new("ci-selftest"), &clock)
        .map_err(|e| e.to_string())?;
    validate(&state).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.reason != NowReason::Task {
        return Err("expected now.reason to return to task".to_string());
    }

    Ok("CI blocker opened and cleared".to_string())
}

fn scenario_dependency_chain() -> Result<String, String> {
    let (_dir, home) = new_home()?;
    let clock = SystemClock;
    let mut state = create_session(
        &home,
        NewSession {
            name: "Selftest Coverage",
            title: "Selftest Coverage",
            purpose: "Coverage pipeline",
            project_root: "/selftest/coverage",
            branch: None,
            environment: Environment::default(),
        },
        &clock,
    )
    .map_err(|e| e.to_string())?;
    let paths = SessionPaths::new(home.session_dir(state.session.as_str()));

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.add_tasks = vec![
        AddTaskInput { title: "Add coverage tests".to_string(), kind: Some(TaskType::Test), depends_on: Vec::new(), implementation_notes: None },
        AddTaskInput { title: "Refactor module".to_string(), kind: Some(TaskType::Refactor), depends_on: vec![1.into()], implementation_notes: None },
    ];
    payload.context_notes = vec!["Coverage chain initialized".to_string()];
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;

    if state.now.reason != NowReason::Task || state.now.task_id.map(|t| t.get()) != Some(1) {
        return Err("expected task 1 to be active".to_string());
    }

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.tasks = vec![TaskStatusPatch { id: 1.into(), status: Some(TaskStatus::Done), new_title: None }];
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.task_id.map(|t| t.get()) != Some(2) {
        return Err("expected dependent task to unlock".to_string());
    }

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.tasks = vec![TaskStatusPatch { id: 2.into(), status: Some(TaskStatus::Done), new_title: None }];
    payload.final_summary = Some("Coverage pipeline wrapped".to_string());
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.reason != NowReason::Completed {
        return Err("expected dependency scenario to complete".to_string());
    }

    Ok("Dependency chain resolved".to_string())
}

/// Not part of the original harness: exercises a blocker opened mid-plan,
/// then a full three-task completion once it clears.
fn scenario_signal_and_tasks() -> Result<String, String> {
    let (_dir, home) = new_home()?;
    let clock = SystemClock;
    let mut state = create_session(
        &home,
        NewSession {
            name: "Selftest Mixed",
            title: "Selftest Mixed",
            purpose: "Signal and task interleaving",
            project_root: "/selftest/mixed",
            branch: None,
            environment: Environment::default(),
        },
        &clock,
    )
    .map_err(|e| e.to_string())?;
    let paths = SessionPaths::new(home.session_dir(state.session.as_str()));

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.add_tasks = vec![
        AddTaskInput { title: "Step one".to_string(), kind: Some(TaskType::Feature), depends_on: Vec::new(), implementation_notes: None },
        AddTaskInput { title: "Step two".to_string(), kind: Some(TaskType::Feature), depends_on: Vec::new(), implementation_notes: None },
        AddTaskInput { title: "Step three".to_string(), kind: Some(TaskType::Feature), depends_on: Vec::new(), implementation_notes: None },
    ];
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.tasks = vec![TaskStatusPatch { id: 1.into(), status: Some(TaskStatus::InProgress), new_title: None }];
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.reason != NowReason::Task || state.now.task_id.map(|t| t.get()) != Some(1) {
        return Err("expected task 1 to be in progress".to_string());
    }

    let signal = Signal::new(
        "mixed-blocker",
        SignalType::System,
        "incident",
        SignalLevel::Blocker,
        "Simulated incident",
        "External dependency unavailable",
    );
    open_signal(&mut state, signal, &clock).map_err(|e| e.to_string())?;
    validate(&state).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.reason != NowReason::CiBlocker {
        return Err("expected blocker to preempt task 1".to_string());
    }

    close_signal(&mut state, &planloop_core::SignalId::new("mixed-blocker"), &clock)
        .map_err(|e| e.to_string())?;
    validate(&state).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.task_id.map(|t| t.get()) != Some(1) {
        return Err("expected task 1 to resume after blocker cleared".to_string());
    }

    for (id, next) in [(1, 2), (2, 3)] {
        let mut payload = new_payload(state.session.as_str(), state.version);
        payload.tasks = vec![TaskStatusPatch { id: id.into(), status: Some(TaskStatus::Done), new_title: None }];
        apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
        save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
        if state.now.task_id.map(|t| t.get()) != Some(next) {
            return Err(format!("expected task {next} to become active"));
        }
    }

    let mut payload = new_payload(state.session.as_str(), state.version);
    payload.tasks = vec![TaskStatusPatch { id: 3.into(), status: Some(TaskStatus::Done), new_title: None }];
    payload.final_summary = Some("Mixed scenario complete".to_string());
    apply_update(&mut state, &payload, &clock).map_err(|e| e.to_string())?;
    save(&home, &paths, &mut state, &clock).map_err(|e| e.to_string())?;
    if state.now.reason != NowReason::Completed {
        return Err("expected mixed scenario to complete".to_string());
    }

    Ok("Signal interleaved with a three-task chain resolved cleanly".to_string())
}

#[cfg(test)]
#[path = "selftest_tests.rs"]
mod tests;
