// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use planloop_core::FakeClock;
use tempfile::tempdir;

#[test]
fn session_id_embeds_slug_and_timestamp() {
    let clock = FakeClock::new(chrono::Utc::now());
    let id = generate_session_id("My Feature!", &clock);
    assert!(id.starts_with("my-feature-"));
    assert_eq!(id.split('-').count(), 5);
}

#[test]
fn blank_name_falls_back_to_session_slug() {
    let clock = FakeClock::new(chrono::Utc::now());
    let id = generate_session_id("???", &clock);
    assert!(id.starts_with("session-"));
}

#[test]
fn create_session_persists_empty_idle_state() {
    let dir = tempdir().unwrap();
    let home = Home::new(dir.path());
    let clock = FakeClock::new(chrono::Utc::now());

    let state = create_session(
        &home,
        NewSession {
            name: "demo",
            title: "Demo session",
            purpose: "exercise the coordinator",
            project_root: "/tmp/demo",
            branch: None,
            environment: Environment::default(),
        },
        &clock,
    )
    .unwrap();

    assert_eq!(state.now.reason, planloop_core::NowReason::Idle);
    assert!(state.tasks.is_empty());
    assert_eq!(home.current_session().as_deref(), Some(state.session.as_str()));

    let paths = SessionPaths::new(home.session_dir(state.session.as_str()));
    assert!(paths.state_path().exists());
}
