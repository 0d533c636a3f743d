//! Debug Recorder Core Library
//!
//! Lifecycle manager for on-demand debug log recording. Reconciles an
//! explicit start/stop request, a durable "recording in progress" setting and
//! a filesystem sentinel into one serialized state, and drives a recording
//! engine to match it. A process that dies mid-recording resumes into the
//! same directory on its next start.
//!
//! # Example
//!
//! ```no_run
//! use debug_recorder_core::{
//!     BuildInfo, Collaborators, CoreResult, DebugRecorder, DiagnosticSources, LogDirNamer,
//!     LogViewer, Orchestrator, RecordingEngine, RecordingEngineFactory, SentinelTrigger,
//!     ServiceNotifier, StateStore, TomlPathSetting,
//! };
//!
//! use std::{path::Path, sync::Arc};
//!
//! struct NullEngine;
//! impl RecordingEngine for NullEngine {
//!     fn start(&mut self, _: &Path) -> CoreResult<()> { Ok(()) }
//!     fn stop(&mut self) -> CoreResult<()> { Ok(()) }
//! }
//!
//! struct Engines;
//! impl RecordingEngineFactory for Engines {
//!     fn create(&self) -> CoreResult<Box<dyn RecordingEngine>> { Ok(Box::new(NullEngine)) }
//! }
//!
//! struct Quiet;
//! impl ServiceNotifier for Quiet {
//!     fn recording_started(&self, _: &Path) -> CoreResult<()> { Ok(()) }
//! }
//! impl LogViewer for Quiet {
//!     fn open(&self, _: &Path) -> CoreResult<()> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let setting = Arc::new(TomlPathSetting::new("/tmp/app/recorder_state.toml"));
//!     let sentinel = SentinelTrigger::in_dir("/tmp/app");
//!     let store = Arc::new(StateStore::initialize(&sentinel, setting.as_ref())?);
//!
//!     let build = BuildInfo {
//!         application_id: "com.example.app".to_string(),
//!         version_code: 1,
//!         version_name: "1.0.0".to_string(),
//!     };
//!     let collaborators = Collaborators {
//!         setting,
//!         sentinel,
//!         namer: LogDirNamer::new("/tmp/app/cache", &build.application_id, build.version_code),
//!         engines: Arc::new(Engines),
//!         notifier: Arc::new(Quiet),
//!         viewer: Arc::new(Quiet),
//!         diagnostics: DiagnosticSources::new(build),
//!     };
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     Orchestrator::new(Arc::clone(&store), collaborators).spawn(shutdown_rx);
//!
//!     let recorder = DebugRecorder::new(store);
//!     let log_dir = recorder.start_recorder().await?;
//!     println!("Recording into {}", log_dir.display());
//!     recorder.stop_recorder().await?;
//!     Ok(())
//! }
//! ```

mod collaborators;
mod diagnostics;
mod error;
mod recorder;
mod state;
mod storage;

pub use {
    collaborators::{LogViewer, RecordingEngine, RecordingEngineFactory, ServiceNotifier},
    diagnostics::{
        AreaDiscovery, BuildInfo, DIAGNOSTICS_TARGET, DiagnosticFact, DiagnosticSnapshot,
        DiagnosticSources, InstallIdentity, UpdateHistory,
    },
    error::{RecorderError, Result as CoreResult},
    recorder::{Collaborators, DEFAULT_RETRY_DELAY, DebugRecorder, Orchestrator, Transition},
    state::{RecorderState, StateSnapshot, StateStore},
    storage::{
        LOG_DIR_TIMESTAMP_FORMAT, LogDirNamer, PathSetting, SENTINEL_FILE_NAME, SentinelLocation,
        SentinelTrigger, TomlPathSetting, create_log_dir, resolve_sentinel_dir,
    },
};

#[cfg(test)]
mod tests;
