// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering `PLAN.md`, a human-readable view derived from session state.
//!
//! This is a read-only convenience for a person skimming a session
//! directory; nothing in the coordinator parses it back.

use planloop_core::{SessionState, TaskStatus};
use std::fmt::Write as _;

/// Render the fixed-template markdown plan document for `state`.
pub fn render_plan(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", state.title);
    let _ = writeln!(out);
    if !state.purpose.is_empty() {
        let _ = writeln!(out, "{}", state.purpose);
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "- session: `{}`", state.session);
    let _ = writeln!(out, "- version: {}", state.version);
    let _ = writeln!(out, "- now: {:?}", state.now.reason);
    let _ = writeln!(out, "- done: {}", state.done);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Tasks");
    let _ = writeln!(out);
    if state.tasks.is_empty() {
        let _ = writeln!(out, "_no tasks_");
    } else {
        for task in &state.tasks {
            let checkbox = if task.status == TaskStatus::Done { "x" } else { " " };
            let _ = writeln!(
                out,
                "- [{checkbox}] #{} {} ({:?}/{:?})",
                task.id, task.title, task.kind, task.status
            );
            if !task.depends_on.is_empty() {
                let deps: Vec<String> = task.depends_on.iter().map(|d| format!("#{d}")).collect();
                let _ = writeln!(out, "  - depends on: {}", deps.join(", "));
            }
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Signals");
    let _ = writeln!(out);
    if state.signals.is_empty() {
        let _ = writeln!(out, "_no signals_");
    } else {
        for signal in &state.signals {
            let status = if signal.open { "open" } else { "closed" };
            let _ = writeln!(
                out,
                "- `{}` [{:?}/{status}] {}: {}",
                signal.id, signal.level, signal.title, signal.message
            );
        }
    }
    let _ = writeln!(out);

    if !state.next_steps.is_empty() {
        let _ = writeln!(out, "## Next steps");
        let _ = writeln!(out);
        for step in &state.next_steps {
            let _ = writeln!(out, "- {step}");
        }
        let _ = writeln!(out);
    }

    if !state.context_notes.is_empty() {
        let _ = writeln!(out, "## Context notes");
        let _ = writeln!(out);
        for note in &state.context_notes {
            let _ = writeln!(out, "- {note}");
        }
        let _ = writeln!(out);
    }

    if let Some(summary) = &state.final_summary {
        let _ = writeln!(out, "## Final summary");
        let _ = writeln!(out);
        let _ = writeln!(out, "{summary}");
    }

    out
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
