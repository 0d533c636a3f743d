//! File-backed recording engine.
//!
//! The tracing subscriber carries a recording layer whose writer is a
//! [`RecordingSink`]. While no recording is active the sink discards every
//! event. Starting a [`FileRecordingEngine`] attaches a non-blocking
//! `debug.log` appender in the recording directory; stopping detaches it and
//! drops the worker guard, which flushes buffered lines.

use debug_recorder_core::{CoreResult, RecorderError, RecordingEngine, RecordingEngineFactory};

use std::{
    io,
    panic::Location,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::fmt::MakeWriter;

/// Prefix of the log file written into each recording directory.
pub const LOG_FILE_PREFIX: &str = "debug";
/// Suffix of the log file written into each recording directory.
pub const LOG_FILE_SUFFIX: &str = "log";

/// Shared writer slot for the recording layer.
#[derive(Clone, Default)]
pub struct RecordingSink {
    active: Arc<RwLock<Option<NonBlocking>>>,
}

impl RecordingSink {
    /// Sink with no recording attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether events are currently written anywhere.
    pub fn is_attached(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    fn attach(&self, writer: NonBlocking) {
        *self.active.write().unwrap_or_else(|e| e.into_inner()) = Some(writer);
    }

    fn detach(&self) -> bool {
        self.active
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .is_some()
    }
}

/// Writer handed out by [`RecordingSink`] for a single event.
pub enum SinkWriter {
    /// A recording is active.
    Recording(NonBlocking),
    /// No recording; output is dropped.
    Idle,
}

impl io::Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkWriter::Recording(writer) => writer.write(buf),
            SinkWriter::Idle => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkWriter::Recording(writer) => writer.flush(),
            SinkWriter::Idle => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RecordingSink {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self
            .active
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            Some(writer) => SinkWriter::Recording(writer.clone()),
            None => SinkWriter::Idle,
        }
    }
}

/// [`RecordingEngine`] that routes the recording layer into `debug.log`.
pub struct FileRecordingEngine {
    sink: RecordingSink,
    guard: Option<WorkerGuard>,
    directory: Option<PathBuf>,
}

impl FileRecordingEngine {
    /// Engine writing through `sink`. Nothing is attached until `start`.
    pub fn new(sink: RecordingSink) -> Self {
        Self {
            sink,
            guard: None,
            directory: None,
        }
    }
}

impl RecordingEngine for FileRecordingEngine {
    #[track_caller]
    #[instrument(skip(self))]
    fn start(&mut self, directory: &Path) -> CoreResult<()> {
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .build(directory)
            .map_err(|e| RecorderError::EngineStart {
                reason: format!("Failed to open log file in {:?}: {}", directory, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if self.sink.is_attached() {
            warn!("Replacing a recording writer that was never detached");
        }

        let (writer, guard) = tracing_appender::non_blocking(appender);
        self.sink.attach(writer);
        self.guard = Some(guard);
        self.directory = Some(directory.to_path_buf());

        info!(directory = ?directory, "Recording engine attached");

        Ok(())
    }

    #[instrument(skip(self), fields(directory = ?self.directory))]
    fn stop(&mut self) -> CoreResult<()> {
        let detached = self.sink.detach();

        // Dropping the guard flushes the worker thread.
        let flushed = self.guard.take().is_some();
        self.directory = None;

        if detached || flushed {
            info!("Recording engine detached");
        } else {
            debug!("Recording engine already stopped");
        }

        Ok(())
    }
}

/// Creates [`FileRecordingEngine`]s sharing one sink.
#[derive(Clone)]
pub struct FileEngineFactory {
    sink: RecordingSink,
}

impl FileEngineFactory {
    /// Factory for engines writing through `sink`.
    pub fn new(sink: RecordingSink) -> Self {
        Self { sink }
    }
}

impl RecordingEngineFactory for FileEngineFactory {
    fn create(&self) -> CoreResult<Box<dyn RecordingEngine>> {
        Ok(Box::new(FileRecordingEngine::new(self.sink.clone())))
    }
}
