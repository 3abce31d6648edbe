//! Tracing configuration and log routing.
//!
//! The extractor logs to stdout using a compact formatter. When `WIKISHARD_LOG_FILE` is
//! set, events are additionally appended to that path through a non-blocking writer so
//! long dump runs can be reviewed after the fact.
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Configure tracing subscribers for stdout and optional file logging.
///
/// Respects `RUST_LOG` for filtering (defaults to `info`). The non-blocking file writer
/// is kept alive through a global guard for the process lifetime.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    if let Some(writer) = configure_file_writer() {
        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .compact();
        registry.with(file_layer).init();
    } else {
        registry.init();
    }
}

/// Build a non-blocking appender for `WIKISHARD_LOG_FILE`, when set.
///
/// Returns `None` when file logging is not requested or the target cannot be opened.
fn configure_file_writer() -> Option<NonBlocking> {
    let path = std::env::var("WIKISHARD_LOG_FILE").ok()?;
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(non_blocking)
        }
        Err(err) => {
            eprintln!("Failed to open log file {path}: {err}");
            None
        }
    }
}
