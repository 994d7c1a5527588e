//! Logging setup: tracing to a file.
//!
//! The terminal is owned by the TUI, so everything logs to
//! `$XDG_STATE_HOME/vivace/vivace.log` (or `~/.local/state/vivace/`).
//! `RUST_LOG` overrides the default `vivace=info` filter.

use std::path::PathBuf;
use std::{env, fs};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Returns the appender guard that must stay alive for the duration of the
/// program, or `None` when no writable log location exists (the app still
/// runs, just silently).
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if fs::create_dir_all(&dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(&dir, "vivace.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vivace=info")),
        )
        .init();

    Some(guard)
}

/// `$XDG_STATE_HOME/vivace`, falling back to `~/.local/state/vivace`.
fn log_dir() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("state"))
    } else {
        None
    };

    state_home.map(|d| d.join("vivace"))
}
