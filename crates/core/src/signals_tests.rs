// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::FakeClock;
use crate::now::NowReason;
use crate::signal::{SignalLevel, SignalType};
use crate::test_support::fresh_state;
use chrono::Utc;

fn blocker(id: &str) -> Signal {
    Signal::new(
        SignalId::new(id),
        SignalType::Ci,
        "build",
        SignalLevel::Blocker,
        "build failing",
        "boom",
    )
}

#[test]
fn open_signal_recomputes_now_as_blocker() {
    let mut state = fresh_state("s1");
    let clk = FakeClock::new(Utc::now());
    open_signal(&mut state, blocker("sig-1"), &clk).unwrap();
    assert_eq!(state.now.reason, NowReason::CiBlocker);
    assert_eq!(state.now.signal_id, Some(SignalId::new("sig-1")));
}

#[test]
fn opening_duplicate_signal_id_fails() {
    let mut state = fresh_state("s1");
    let clk = FakeClock::new(Utc::now());
    open_signal(&mut state, blocker("sig-1"), &clk).unwrap();
    let err = open_signal(&mut state, blocker("sig-1"), &clk).unwrap_err();
    assert_eq!(err, SignalError::AlreadyExists(SignalId::new("sig-1")));
}

#[test]
fn closing_signal_clears_blocker_state() {
    let mut state = fresh_state("s1");
    let clk = FakeClock::new(Utc::now());
    open_signal(&mut state, blocker("sig-1"), &clk).unwrap();
    close_signal(&mut state, &SignalId::new("sig-1"), &clk).unwrap();
    assert_eq!(state.now.reason, NowReason::Idle);
    assert!(!state.signal(&SignalId::new("sig-1")).unwrap().open);
}

#[test]
fn closing_unknown_signal_fails() {
    let mut state = fresh_state("s1");
    let clk = FakeClock::new(Utc::now());
    let err = close_signal(&mut state, &SignalId::new("missing"), &clk).unwrap_err();
    assert_eq!(err, SignalError::NotFound(SignalId::new("missing")));
}
