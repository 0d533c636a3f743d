#![allow(clippy::unwrap_used)]

use crate::{
    App, RecordingSink,
    config::{Config, PathsConfig, ResolvedPaths},
};

use std::path::Path;

/// Locations rooted entirely inside `root`.
pub(crate) fn temp_paths(root: &Path) -> ResolvedPaths {
    PathsConfig {
        cache_root: Some(root.join("cache")),
        sentinel_dir: Some(root.join("private")),
        fallback_root: root.join("fallback"),
        data_areas_root: None,
    }
    .resolve(&root.join("config"), &root.join("data"), &root.join("platform-cache"))
}

/// Config with desktop side effects disabled and short timings.
pub(crate) fn quiet_config() -> Config {
    let mut config = Config::default();
    config.behavior.open_viewer_on_stop = false;
    config.behavior.notify_on_start = false;
    config.recorder.await_timeout_secs = Some(5);
    config.recorder.retry_delay_ms = 10;
    config
}

/// App wired against `root` with a sink that no subscriber reads.
pub(crate) fn build_app(root: &Path, config: Config) -> App {
    App::build(config, &temp_paths(root), RecordingSink::new()).unwrap()
}
