use crate::{
    AppError, AppResult, FileEngineFactory, RecordingSink,
    config::{Config, ResolvedPaths},
    platform::{
        DesktopNotifier, DirectoryAreaDiscovery, FileInstallIdentity, FileUpdateHistory,
        SystemViewer,
    },
    server,
};

use debug_recorder_core::{
    Collaborators, DebugRecorder, DiagnosticSources, LogDirNamer, Orchestrator, SentinelTrigger,
    StateStore, TomlPathSetting,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{net::TcpListener, sync::watch, time::timeout};
use tracing::{error, info, instrument, warn};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Main application state.
///
/// Owns the recorder entry point, the orchestrator that has not been spawned
/// yet, and the shutdown channel shared by every background task.
pub struct App {
    pub(crate) config: Config,
    pub(crate) recorder: DebugRecorder,
    pub(crate) orchestrator: Orchestrator,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Wire the recorder against the filesystem locations in `paths`.
    ///
    /// Reads the sentinel and the durable setting once to seed the initial
    /// desired state; nothing is started until [`App::run`].
    #[track_caller]
    #[instrument(skip(config, sink))]
    pub(crate) fn build(config: Config, paths: &ResolvedPaths, sink: RecordingSink) -> AppResult<Self> {
        let build = config.recorder.build_info();

        let setting = Arc::new(TomlPathSetting::new(&paths.setting_file));
        let (sentinel, sentinel_location) = SentinelTrigger::resolve(
            Some(&paths.sentinel_dir),
            &paths.fallback_root,
            &build.application_id,
        )?;
        info!(
            sentinel = ?sentinel.path(),
            location = ?sentinel_location,
            "Sentinel trigger resolved"
        );

        let store = Arc::new(StateStore::initialize(&sentinel, setting.as_ref())?);

        let diagnostics = DiagnosticSources::new(build.clone())
            .with_install_identity(Arc::new(FileInstallIdentity::new(&paths.install_id_file)))
            .with_area_discovery(Arc::new(DirectoryAreaDiscovery::new(&paths.data_areas_root)))
            .with_update_history(Arc::new(FileUpdateHistory::new(
                &paths.update_history_file,
            )));

        let collaborators = Collaborators {
            setting,
            sentinel,
            namer: LogDirNamer::new(&paths.cache_root, &build.application_id, build.version_code),
            engines: Arc::new(FileEngineFactory::new(sink)),
            notifier: Arc::new(DesktopNotifier::new(
                config.behavior.notify_on_start,
                &build.application_id,
            )),
            viewer: Arc::new(SystemViewer::new(config.behavior.open_viewer_on_stop)),
            diagnostics,
        };

        let orchestrator = Orchestrator::new(Arc::clone(&store), collaborators)
            .with_retry_delay(config.recorder.retry_delay());
        let recorder = DebugRecorder::new(store).with_await_timeout(config.recorder.await_timeout());
        let (shutdown_tx, _) = watch::channel(false);

        info!(state = ?recorder.state(), "Recorder initialized");

        Ok(Self {
            config,
            recorder,
            orchestrator,
            shutdown_tx,
        })
    }

    /// Run the orchestrator and the control surface until Ctrl-C.
    ///
    /// An active recording is left in place; the durable setting resumes it
    /// on the next launch.
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        info!("Debug Recorder starting");

        let App {
            config,
            recorder,
            orchestrator,
            shutdown_tx,
        } = self;

        let caller = Location::caller();
        let listener = TcpListener::bind(config.server.bind_addr())
            .await
            .map_err(|e| AppError::ServerError {
                reason: format!("Failed to bind {}: {}", config.server.bind_addr(), e),
                location: ErrorLocation::from(caller),
            })?;
        info!(url = %config.server_url(), "Control surface listening");

        let orchestrator_handle = orchestrator.spawn(shutdown_tx.subscribe());
        let mut server_handle = tokio::spawn(server::serve(
            listener,
            server::router(recorder.clone()),
            shutdown_tx.subscribe(),
        ));

        let early_exit = tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => info!("Shutdown requested"),
                    Err(e) => error!(error = ?e, "Failed to listen for Ctrl-C, shutting down"),
                }
                None
            }
            joined = &mut server_handle => Some(joined),
        };

        let _ = shutdown_tx.send(true);

        let server_result = match early_exit {
            Some(joined) => Ok(joined),
            None => timeout(SHUTDOWN_TIMEOUT, server_handle).await,
        };
        match server_result {
            Ok(Ok(Ok(()))) => info!("Control surface stopped cleanly"),
            Ok(Ok(Err(e))) => error!(error = ?e, "Control surface error"),
            Ok(Err(e)) => error!(error = ?e, "Control surface task panicked"),
            Err(_) => warn!("Control surface did not stop within timeout"),
        }

        match timeout(SHUTDOWN_TIMEOUT, orchestrator_handle).await {
            Ok(Ok(())) => info!("Orchestrator stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Orchestrator task panicked"),
            Err(_) => warn!("Orchestrator did not stop within timeout"),
        }

        let state = recorder.state();
        if state.is_recording {
            info!(
                log_dir = ?state.current_log_dir,
                "Recording left active, it resumes on next launch"
            );
        }
        info!("Debug Recorder shut down successfully");

        Ok(())
    }
}
