//! Reactive driver of recorder transitions.
//!
//! The orchestrator subscribes to the [`StateStore`] and, for every published
//! value, runs one serialized update that starts, stops, or leaves the
//! recording alone. A failing transition is logged and the subscription is
//! re-established after a delay, so the desired state is retried until it
//! sticks.

use crate::{
    CoreResult, DiagnosticSnapshot, DiagnosticSources, LogDirNamer, PathSetting, RecorderError,
    RecorderState, SentinelTrigger, StateStore,
    collaborators::{LogViewer, RecordingEngineFactory, ServiceNotifier},
    storage::create_log_dir,
};

use std::{
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, error, info, instrument, warn};

/// Default pause before resubscribing after a failed transition.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Outcome of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// An engine was started against this directory.
    Started(PathBuf),
    /// The engine recording into this directory was stopped.
    Stopped(PathBuf),
    /// Desired and actual state already agreed.
    Unchanged,
}

/// Everything the orchestrator drives besides the state store.
pub struct Collaborators {
    /// Durable path of an unfinished recording.
    pub setting: Arc<dyn PathSetting>,
    /// Marker file requesting recording.
    pub sentinel: SentinelTrigger,
    /// Mints new recording directories.
    pub namer: LogDirNamer,
    /// Creates recording engine handles.
    pub engines: Arc<dyn RecordingEngineFactory>,
    /// Told once per Start.
    pub notifier: Arc<dyn ServiceNotifier>,
    /// Receives finished recordings.
    pub viewer: Arc<dyn LogViewer>,
    /// Inputs of the per-Start diagnostic snapshot.
    pub diagnostics: DiagnosticSources,
}

/// Standing subscriber that applies Start/Stop transitions.
pub struct Orchestrator {
    store: Arc<StateStore>,
    collaborators: Collaborators,
    retry_delay: Duration,
}

impl Orchestrator {
    /// Orchestrator over `store`, retrying failed transitions after [`DEFAULT_RETRY_DELAY`].
    pub fn new(store: Arc<StateStore>, collaborators: Collaborators) -> Self {
        Self {
            store,
            collaborators,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Override the pause between a failed transition and the retry.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Run [`Orchestrator::run`] on the current tokio runtime.
    pub fn spawn(self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown_rx))
    }

    /// Supervised subscription loop.
    ///
    /// Returns only when `shutdown_rx` changes. Errors never end the loop:
    /// they are logged, and after `retry_delay` a fresh subscription replays
    /// the current state so the failed transition is attempted again.
    #[instrument(skip_all)]
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("Orchestrator started");

        loop {
            match self.drive(&mut shutdown_rx).await {
                Ok(()) => break,
                Err(e) => {
                    error!(
                        error = ?e,
                        retry_delay_ms = self.retry_delay.as_millis(),
                        "Recorder transition failed, resubscribing"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(self.retry_delay) => {}
                        _ = shutdown_rx.changed() => break,
                    }
                }
            }
        }

        info!("Orchestrator stopped");
    }

    async fn drive(&self, shutdown_rx: &mut watch::Receiver<bool>) -> CoreResult<()> {
        let mut states = self.store.subscribe();

        loop {
            tokio::select! {
                changed = states.changed() => {
                    if changed.is_err() {
                        return Ok(());
                    }
                    let observed = states.borrow_and_update().clone();
                    let transition = self.reconcile().await?;
                    debug!(state = ?observed, transition = ?transition, "Reconciled");
                }
                _ = shutdown_rx.changed() => {
                    info!("Orchestrator shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Apply the one legal transition for the current state.
    pub async fn reconcile(&self) -> CoreResult<Transition> {
        self.store.update(|state| self.transition(state)).await
    }

    fn transition(&self, state: &mut RecorderState) -> CoreResult<Transition> {
        match (state.is_recording(), state.should_record()) {
            (false, true) => self.start(state).map(Transition::Started),
            (true, false) => self.stop(state).map(Transition::Stopped),
            _ => Ok(Transition::Unchanged),
        }
    }

    /// Start branch. Nothing is committed to `state` unless the engine started.
    #[instrument(skip_all)]
    fn start(&self, state: &mut RecorderState) -> CoreResult<PathBuf> {
        let c = &self.collaborators;

        let log_dir = match c.setting.load()? {
            Some(persisted) => {
                info!(log_dir = ?persisted, "Resuming recording into persisted directory");
                persisted
            }
            None => {
                let minted = c.namer.mint();
                c.setting.store(Some(&minted))?;
                info!(log_dir = ?minted, "Minted new recording directory");
                minted
            }
        };

        create_log_dir(&log_dir)?;

        let mut engine = c.engines.create()?;
        engine.start(&log_dir)?;

        match c.sentinel.ensure() {
            Ok(created) => debug!(created, "Sentinel trigger present"),
            Err(e) => warn!(error = ?e, "Failed to create sentinel trigger"),
        }

        DiagnosticSnapshot::collect(&c.diagnostics).emit();

        if let Err(e) = c.notifier.recording_started(&log_dir) {
            warn!(error = ?e, "Failed to notify service of recording start");
        }

        state.begin(engine, log_dir.clone());
        info!(log_dir = ?log_dir, "Recording started");

        Ok(log_dir)
    }

    /// Stop branch. The engine handle is only dropped once the setting is cleared.
    #[instrument(skip_all)]
    fn stop(&self, state: &mut RecorderState) -> CoreResult<PathBuf> {
        let c = &self.collaborators;
        let log_dir = state.current_log_dir().map(Path::to_path_buf);

        if let Some(engine) = state.engine_mut() {
            if let Err(e) = engine.stop() {
                warn!(error = ?e, log_dir = ?log_dir, "Recording engine failed to stop cleanly");
            }
        }

        c.setting.store(None)?;

        if let Err(e) = c.sentinel.remove() {
            warn!(error = ?e, "Failed to delete sentinel trigger");
        }

        let finished = state.finish().ok_or_else(|| RecorderError::Invariant {
            reason: "stop requested without an active recording".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Err(e) = c.viewer.open(&finished) {
            warn!(error = ?e, log_dir = ?finished, "Failed to hand recording to viewer");
        }

        info!(log_dir = ?finished, "Recording stopped");

        Ok(finished)
    }
}
