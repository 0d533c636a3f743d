//! Local HTTP control surface for the recorder.

use crate::{AppError, AppResult};

use debug_recorder_core::{DebugRecorder, StateSnapshot};

use std::{panic::Location, path::PathBuf};

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use error_location::ErrorLocation;
use serde::Serialize;
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, instrument};

/// Body of start and stop responses.
#[derive(Debug, Serialize)]
pub struct LogDirResponse {
    /// Directory the request resolved to; `null` when stop found nothing to stop.
    pub log_dir: Option<PathBuf>,
}

/// Routes of the control surface.
pub fn router(recorder: DebugRecorder) -> Router {
    Router::new()
        .route("/recorder/start", post(start_recorder))
        .route("/recorder/stop", post(stop_recorder))
        .route("/recorder/state", get(recorder_state))
        .with_state(recorder)
}

/// Serve `router` on `listener` until `shutdown_rx` turns true.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown_rx: watch::Receiver<bool>,
) -> AppResult<()> {
    let caller = Location::caller();

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
        })
        .await
        .map_err(|e| AppError::ServerError {
            reason: format!("Control surface failed: {}", e),
            location: ErrorLocation::from(caller),
        })?;

    info!("Control surface stopped");

    Ok(())
}

#[instrument(skip(recorder))]
async fn start_recorder(State(recorder): State<DebugRecorder>) -> AppResult<Json<LogDirResponse>> {
    let log_dir = recorder.start_recorder().await?;
    info!(log_dir = ?log_dir, "Start requested over control surface");
    Ok(Json(LogDirResponse {
        log_dir: Some(log_dir),
    }))
}

#[instrument(skip(recorder))]
async fn stop_recorder(State(recorder): State<DebugRecorder>) -> AppResult<Json<LogDirResponse>> {
    let log_dir = recorder.stop_recorder().await?;
    info!(log_dir = ?log_dir, "Stop requested over control surface");
    Ok(Json(LogDirResponse { log_dir }))
}

async fn recorder_state(State(recorder): State<DebugRecorder>) -> Json<StateSnapshot> {
    Json(recorder.state())
}
