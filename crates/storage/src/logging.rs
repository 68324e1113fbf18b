// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dual-layer tracing setup: human text + structured JSONL, per session.

use crate::home::SessionPaths;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Guards that must be kept alive for the duration of the process so the
/// non-blocking writers keep flushing.
pub struct LoggingGuards {
    _text: WorkerGuard,
    _jsonl: WorkerGuard,
}

/// Install the two session log layers (`logs/planloop.log`, `logs/planloop.jsonl`).
///
/// `level` is a `tracing` `EnvFilter` directive (e.g. `"info"`); `RUST_LOG`
/// overrides it when set.
pub fn init_session_logging(paths: &SessionPaths, level: &str) -> io::Result<LoggingGuards> {
    paths.ensure()?;

    let text_appender = tracing_appender::rolling::never(
        paths.logs_dir(),
        paths
            .log_path()
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("planloop.log")),
    );
    let (text_writer, text_guard) = tracing_appender::non_blocking(text_appender);

    let jsonl_appender = tracing_appender::rolling::never(
        paths.logs_dir(),
        paths
            .jsonl_log_path()
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("planloop.jsonl")),
    );
    let (jsonl_writer, jsonl_guard) = tracing_appender::non_blocking(jsonl_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(text_writer))
        .with(fmt::layer().json().with_writer(jsonl_writer))
        .init();

    Ok(LoggingGuards {
        _text: text_guard,
        _jsonl: jsonl_guard,
    })
}
