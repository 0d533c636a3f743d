use std::{path::PathBuf, time::Duration};

use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder lifecycle errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// Filesystem operation failed.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording directory could not be created.
    #[error("Failed to create recording directory {path:?}: {source} {location}")]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording engine refused to start.
    #[error("Recording engine failed to start: {reason} {location}")]
    EngineStart {
        /// Description of the engine failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Durable path setting could not be read or written.
    #[error("Durable path setting error: {reason} {location}")]
    Setting {
        /// Description of the setting failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sentinel trigger file operation failed.
    #[error("Sentinel trigger error at {path:?}: {source} {location}")]
    Sentinel {
        /// Path of the sentinel file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Neither the private nor the fallback sentinel directory is usable.
    #[error("No usable sentinel directory: {reason} {location}")]
    SentinelUnavailable {
        /// Why both candidates were rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Waiting for a matching published state exceeded the configured timeout.
    #[error("Timed out after {timeout:?} waiting for recorder state {location}")]
    AwaitTimeout {
        /// The timeout that elapsed.
        timeout: Duration,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The state store was dropped while a caller was waiting on it.
    #[error("State store closed {location}")]
    StoreClosed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// An external collaborator (viewer, notifier, diagnostics source) failed.
    #[error("{collaborator} failed: {reason} {location}")]
    Collaborator {
        /// Which collaborator failed.
        collaborator: &'static str,
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A published state broke a recorder invariant.
    #[error("Recorder invariant violated: {reason} {location}")]
    Invariant {
        /// Which invariant was broken.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for RecorderError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        RecorderError::Io {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
