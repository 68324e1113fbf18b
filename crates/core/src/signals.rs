// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opening and closing signals against a session.

use crate::clock::Clock;
use crate::id::SignalId;
use crate::scheduler::compute_now;
use crate::session_state::SessionState;
use crate::signal::Signal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal {0} already exists")]
    AlreadyExists(SignalId),
    #[error("signal {0} not found")]
    NotFound(SignalId),
}

/// Append a new signal to the session and recompute `now`.
pub fn open_signal(
    state: &mut SessionState,
    signal: Signal,
    clock: &dyn Clock,
) -> Result<(), SignalError> {
    if state.signal(&signal.id).is_some() {
        return Err(SignalError::AlreadyExists(signal.id));
    }
    state.signals.push(signal);
    state.last_updated_at = clock.now();
    state.now = compute_now(state);
    Ok(())
}

/// Mark an existing signal closed and recompute `now`.
pub fn close_signal(
    state: &mut SessionState,
    signal_id: &SignalId,
    clock: &dyn Clock,
) -> Result<(), SignalError> {
    let signal = state
        .signal_mut(signal_id)
        .ok_or_else(|| SignalError::NotFound(signal_id.clone()))?;
    signal.open = false;
    state.last_updated_at = clock.now();
    state.now = compute_now(state);
    Ok(())
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
