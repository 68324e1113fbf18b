// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_signal_starts_open_with_zero_attempts() {
    let sig = Signal::new(
        "ci1",
        SignalType::Ci,
        "build",
        SignalLevel::Blocker,
        "CI failed",
        "build step failed",
    );
    assert!(sig.open);
    assert_eq!(sig.attempts, 0);
    assert!(sig.is_open_blocker());
}

#[test]
fn closed_signal_is_not_a_blocker() {
    let mut sig = Signal::new(
        "ci1",
        SignalType::Ci,
        "build",
        SignalLevel::Blocker,
        "t",
        "m",
    );
    sig.open = false;
    assert!(!sig.is_open_blocker());
}

#[test]
fn high_level_signal_is_never_a_blocker() {
    let sig = Signal::new("x", SignalType::Lint, "style", SignalLevel::High, "t", "m");
    assert!(!sig.is_open_blocker());
}

#[test]
fn signal_field_names_on_wire() {
    let sig = Signal::new(
        "ci1",
        SignalType::Ci,
        "build",
        SignalLevel::Blocker,
        "t",
        "m",
    );
    let value = serde_json::to_value(&sig).unwrap();
    assert_eq!(value["type"], "ci");
    assert_eq!(value["kind"], "build");
    assert_eq!(value["level"], "blocker");
}
