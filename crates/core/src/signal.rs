// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Out-of-band signals (typically blockers) that preempt task scheduling.

use crate::id::SignalId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// How urgently a signal should preempt scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalLevel {
    Blocker,
    High,
    Info,
}

/// The broad category of event a signal represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Ci,
    Lint,
    Bench,
    System,
    Other,
}

/// An out-of-band event, typically a blocker, raised against a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: SignalId,
    #[serde(rename = "type")]
    pub signal_type: SignalType,
    pub kind: String,
    pub level: SignalLevel,
    #[serde(default = "default_open")]
    pub open: bool,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub extra: HashMap<String, Value>,
    #[serde(default)]
    pub attempts: u32,
}

fn default_open() -> bool {
    true
}

impl Signal {
    pub fn new(
        id: impl Into<SignalId>,
        signal_type: SignalType,
        kind: impl Into<String>,
        level: SignalLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            signal_type,
            kind: kind.into(),
            level,
            open: true,
            title: title.into(),
            message: message.into(),
            link: None,
            extra: HashMap::new(),
            attempts: 0,
        }
    }

    pub fn is_open_blocker(&self) -> bool {
        self.open && self.level == SignalLevel::Blocker
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
