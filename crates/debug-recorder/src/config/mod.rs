mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod paths_config;
mod recorder_config;
mod server_config;

pub(crate) use {
    behaviour_config::BehaviourConfig,
    config::Config,
    paths_config::{PathsConfig, ResolvedPaths},
    recorder_config::RecorderConfig,
    server_config::ServerConfig,
};

pub(crate) const DEFAULT_APPLICATION_ID: &str = "com.example.app";
pub(crate) const DEFAULT_VERSION_CODE: u64 = 1;
pub(crate) const DEFAULT_AWAIT_TIMEOUT_SECS: u64 = 30;
pub(crate) const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
pub(crate) const DEFAULT_FALLBACK_ROOT: &str = "/tmp";
pub(crate) const DEFAULT_PORT: u16 = 7879;
pub(crate) const DEFAULT_OPEN_VIEWER_ON_STOP: bool = true;
pub(crate) const DEFAULT_NOTIFY_ON_START: bool = true;

pub(crate) fn default_application_id() -> String {
    DEFAULT_APPLICATION_ID.to_string()
}

pub(crate) fn default_version_code() -> u64 {
    DEFAULT_VERSION_CODE
}

pub(crate) fn default_version_name() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_await_timeout_secs() -> Option<u64> {
    Some(DEFAULT_AWAIT_TIMEOUT_SECS)
}

pub(crate) fn default_retry_delay_ms() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

pub(crate) fn default_fallback_root() -> std::path::PathBuf {
    std::path::PathBuf::from(DEFAULT_FALLBACK_ROOT)
}

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_open_viewer_on_stop() -> bool {
    DEFAULT_OPEN_VIEWER_ON_STOP
}

pub(crate) fn default_notify_on_start() -> bool {
    DEFAULT_NOTIFY_ON_START
}
