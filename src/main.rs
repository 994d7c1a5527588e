use anyhow::Result;

mod app;
mod audio;
mod catalog;
mod config;
mod logging;
mod mpris;
mod runtime;
mod search;
mod ui;

fn main() -> Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit.
    let _log_guard = logging::init();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting vivace");

    runtime::run()
}
