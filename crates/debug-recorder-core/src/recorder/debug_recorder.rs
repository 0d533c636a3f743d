use crate::{CoreResult, RecorderError, StateSnapshot, StateStore};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Public entry points for requesting and ending a recording.
///
/// Both calls flip the desired state through the store and then wait for
/// the orchestrator to commit the matching transition. The wait keys on the
/// start and stop generations read inside the caller's own update, so a
/// transition that was committed and then superseded is still observed.
#[derive(Clone)]
pub struct DebugRecorder {
    store: Arc<StateStore>,
    await_timeout: Option<Duration>,
}

impl DebugRecorder {
    /// Entry points over `store` that wait indefinitely.
    pub fn new(store: Arc<StateStore>) -> Self {
        Self {
            store,
            await_timeout: None,
        }
    }

    /// Bound how long the entry points wait for the orchestrator.
    pub fn with_await_timeout(mut self, await_timeout: Option<Duration>) -> Self {
        self.await_timeout = await_timeout;
        self
    }

    /// Latest published state.
    pub fn state(&self) -> StateSnapshot {
        self.store.current()
    }

    /// Request recording and return the active directory once it is running.
    ///
    /// Already recording: nothing changes and the active directory is returned.
    ///
    /// # Errors
    ///
    /// [`RecorderError::AwaitTimeout`] if a timeout is set and no running
    /// recording is published in time.
    #[instrument(skip(self))]
    pub async fn start_recorder(&self) -> CoreResult<PathBuf> {
        let mut states = self.store.subscribe();
        let started_before = self
            .store
            .update(|state| {
                state.set_should_record(true);
                Ok(state.start_generation())
            })
            .await?;

        // A start that already committed and then stopped again still counts.
        let snapshot = StateStore::wait_for(&mut states, self.await_timeout, |s| {
            s.is_recording || s.start_generation > started_before
        })
        .await?;

        let log_dir = snapshot
            .current_log_dir
            .or(snapshot.last_log_dir)
            .ok_or_else(|| RecorderError::Invariant {
                reason: "recording published without a log directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(log_dir = ?log_dir, "Recorder running");
        Ok(log_dir)
    }

    /// End the active recording and return its directory.
    ///
    /// Not recording: returns `None` immediately without touching the state.
    ///
    /// # Errors
    ///
    /// [`RecorderError::AwaitTimeout`] if a timeout is set and the stop is
    /// not published in time.
    #[instrument(skip(self))]
    pub async fn stop_recorder(&self) -> CoreResult<Option<PathBuf>> {
        let mut states = self.store.subscribe();

        let pending = self
            .store
            .update(|state| {
                let active = state.current_log_dir().map(Path::to_path_buf);
                if active.is_some() {
                    state.set_should_record(false);
                }
                Ok(active.map(|log_dir| (log_dir, state.stop_generation())))
            })
            .await?;

        let Some((log_dir, stopped_before)) = pending else {
            return Ok(None);
        };

        // Wait on the stop count: a later start may already have replaced the
        // idle value this call would otherwise look for.
        StateStore::wait_for(&mut states, self.await_timeout, |s| {
            s.stop_generation > stopped_before
        })
        .await?;

        info!(log_dir = ?log_dir, "Recorder stopped");
        Ok(Some(log_dir))
    }
}
