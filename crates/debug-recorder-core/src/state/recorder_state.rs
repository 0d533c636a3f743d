use crate::collaborators::RecordingEngine;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;

/// The single mutable recorder record held by the [`StateStore`](crate::StateStore).
///
/// The engine handle and the active directory are only ever set or cleared
/// together, so `is_recording() == current_log_dir().is_some()` always holds.
pub struct RecorderState {
    should_record: bool,
    active: Option<ActiveRecording>,
    last_log_dir: Option<PathBuf>,
    start_generation: u64,
    stop_generation: u64,
}

struct ActiveRecording {
    engine: Box<dyn RecordingEngine>,
    log_dir: PathBuf,
}

impl RecorderState {
    /// Create an idle state with the given desired recording flag.
    pub fn new(should_record: bool) -> Self {
        Self {
            should_record,
            active: None,
            last_log_dir: None,
            start_generation: 0,
            stop_generation: 0,
        }
    }

    /// Desired state, settable by callers.
    pub fn should_record(&self) -> bool {
        self.should_record
    }

    /// Flip the desired state. Returns `true` if the value changed.
    pub fn set_should_record(&mut self, should_record: bool) -> bool {
        let changed = self.should_record != should_record;
        self.should_record = should_record;
        changed
    }

    /// Whether an engine handle is currently held.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Directory backing the active recording.
    pub fn current_log_dir(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.log_dir.as_path())
    }

    /// Directory of the most recently finished recording.
    pub fn last_log_dir(&self) -> Option<&Path> {
        self.last_log_dir.as_deref()
    }

    /// Number of recordings committed so far.
    pub fn start_generation(&self) -> u64 {
        self.start_generation
    }

    /// Number of recordings finished so far.
    pub fn stop_generation(&self) -> u64 {
        self.stop_generation
    }

    /// Commit a started engine against its directory.
    pub(crate) fn begin(&mut self, engine: Box<dyn RecordingEngine>, log_dir: PathBuf) {
        self.active = Some(ActiveRecording { engine, log_dir });
        self.start_generation += 1;
    }

    /// Borrow the active engine, if any.
    pub(crate) fn engine_mut(&mut self) -> Option<&mut (dyn RecordingEngine + 'static)> {
        self.active.as_mut().map(|a| a.engine.as_mut())
    }

    /// Drop the engine handle and move the active directory into `last_log_dir`.
    pub(crate) fn finish(&mut self) -> Option<PathBuf> {
        let finished = self.active.take()?.log_dir;
        self.last_log_dir = Some(finished.clone());
        self.stop_generation += 1;
        Some(finished)
    }

    /// Cloneable view of this state for publication.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            should_record: self.should_record,
            is_recording: self.is_recording(),
            current_log_dir: self.current_log_dir().map(Path::to_path_buf),
            last_log_dir: self.last_log_dir.clone(),
            start_generation: self.start_generation,
            stop_generation: self.stop_generation,
        }
    }
}

impl fmt::Debug for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecorderState")
            .field("should_record", &self.should_record)
            .field("is_recording", &self.is_recording())
            .field("current_log_dir", &self.current_log_dir())
            .field("last_log_dir", &self.last_log_dir)
            .field("start_generation", &self.start_generation)
            .field("stop_generation", &self.stop_generation)
            .finish()
    }
}

/// Published value of the recorder state.
///
/// The engine handle never leaves the store; subscribers see this instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// Desired recording state.
    pub should_record: bool,
    /// Whether an engine is running.
    pub is_recording: bool,
    /// Directory of the active recording.
    pub current_log_dir: Option<PathBuf>,
    /// Directory of the most recently finished recording.
    pub last_log_dir: Option<PathBuf>,
    /// Count of committed starts. Never decreases.
    pub start_generation: u64,
    /// Count of committed stops. Never decreases.
    pub stop_generation: u64,
}

impl StateSnapshot {
    /// `true` once the desired and actual recording states agree.
    pub fn is_settled(&self) -> bool {
        self.should_record == self.is_recording
    }
}
