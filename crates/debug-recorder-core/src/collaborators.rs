//! Boundaries to the components the recorder drives but does not own.
//!
//! Every trait here is implemented outside this crate. The orchestrator only
//! calls them from inside a serialized state update.

use crate::CoreResult;

use std::path::Path;

/// Byte-level log writer bound to one recording directory.
///
/// A handle is created per Start and owned by the recorder state until Stop.
pub trait RecordingEngine: Send {
    /// Begin capturing into `directory`.
    fn start(&mut self, directory: &Path) -> CoreResult<()>;

    /// Stop capturing and flush.
    ///
    /// Must be idempotent: a Stop transition that aborts after this call is
    /// retried and will call it again.
    fn stop(&mut self) -> CoreResult<()>;
}

/// Creates fresh [`RecordingEngine`] handles.
pub trait RecordingEngineFactory: Send + Sync {
    /// Instantiate an engine that has not been started yet.
    fn create(&self) -> CoreResult<Box<dyn RecordingEngine>>;
}

/// Keeps the host process alive while a recording is running.
pub trait ServiceNotifier: Send + Sync {
    /// Called exactly once per successful Start.
    fn recording_started(&self, directory: &Path) -> CoreResult<()>;
}

/// Surface that opens a finished recording.
pub trait LogViewer: Send + Sync {
    /// Hand the finished directory to the viewer.
    fn open(&self, directory: &Path) -> CoreResult<()>;
}
