use crate::config::default_fallback_root;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub(crate) const SETTING_FILE_NAME: &str = "recorder_state.toml";
pub(crate) const INSTALL_ID_FILE_NAME: &str = "install_id";
pub(crate) const UPDATE_HISTORY_FILE_NAME: &str = "update_history.log";
pub(crate) const DATA_AREAS_DIR_NAME: &str = "areas";

/// Filesystem locations. Unset entries fall back to the platform directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root under which `debug/logs/` recordings are created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_root: Option<PathBuf>,

    /// Preferred directory for the sentinel trigger file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentinel_dir: Option<PathBuf>,

    /// Shared root used when the preferred sentinel directory is unusable.
    #[serde(default = "default_fallback_root")]
    pub fallback_root: PathBuf,

    /// Directory whose subdirectories are reported as data areas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_areas_root: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cache_root: None,
            sentinel_dir: None,
            fallback_root: default_fallback_root(),
            data_areas_root: None,
        }
    }
}

/// Concrete locations after applying platform defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root of the recording directory tree.
    pub cache_root: PathBuf,
    /// Preferred sentinel directory.
    pub sentinel_dir: PathBuf,
    /// Sentinel fallback root.
    pub fallback_root: PathBuf,
    /// Durable path setting file.
    pub setting_file: PathBuf,
    /// Persisted install identifier.
    pub install_id_file: PathBuf,
    /// Update history log.
    pub update_history_file: PathBuf,
    /// Data area root.
    pub data_areas_root: PathBuf,
}

impl PathsConfig {
    /// Fill unset locations from the platform config, data and cache directories.
    pub fn resolve(&self, config_dir: &Path, data_dir: &Path, cache_dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            cache_root: self
                .cache_root
                .clone()
                .unwrap_or_else(|| cache_dir.to_path_buf()),
            sentinel_dir: self
                .sentinel_dir
                .clone()
                .unwrap_or_else(|| data_dir.to_path_buf()),
            fallback_root: self.fallback_root.clone(),
            setting_file: config_dir.join(SETTING_FILE_NAME),
            install_id_file: data_dir.join(INSTALL_ID_FILE_NAME),
            update_history_file: data_dir.join(UPDATE_HISTORY_FILE_NAME),
            data_areas_root: self
                .data_areas_root
                .clone()
                .unwrap_or_else(|| data_dir.join(DATA_AREAS_DIR_NAME)),
        }
    }
}
