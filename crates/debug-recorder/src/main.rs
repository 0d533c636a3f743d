//! Debug Recorder: on-demand debug log recording that survives restarts.

mod app;
mod config;
mod error;
mod platform;
mod recording_engine;
mod server;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    error::{AppError, Result as AppResult},
    recording_engine::{FileEngineFactory, RecordingSink},
};

use crate::config::Config;

use debug_recorder_core::DIAGNOSTICS_TARGET;

use tracing::error;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CONSOLE_LOG_FILTER: &str = "debug_recorder=info,debug_recorder_core=info";

/// Application entry point.
fn main() {
    let sink = RecordingSink::new();
    init_tracing(sink.clone());

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let paths = match config.resolve_paths() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to resolve paths: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = match App::build(config, &paths, sink) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize recorder: {:?}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(app.run()) {
        error!(error = ?e, "App error");
        std::process::exit(1);
    }
}

/// Console output filtered by `RUST_LOG`, plus a JSON recording layer that
/// only writes while a recording is attached to `sink`.
fn init_tracing(sink: RecordingSink) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_LOG_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(console_filter))
        .with(
            fmt::layer()
                .json()
                .with_writer(sink)
                .with_filter(recording_filter()),
        )
        .init();
}

/// Targets written into a recording, independent of `RUST_LOG`.
pub(crate) fn recording_filter() -> EnvFilter {
    EnvFilter::new(format!(
        "debug_recorder=debug,debug_recorder_core=debug,{}=info",
        DIAGNOSTICS_TARGET
    ))
}
