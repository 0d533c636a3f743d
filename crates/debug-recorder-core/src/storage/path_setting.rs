use crate::{CoreResult, RecorderError};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Persisted optional directory of a recording that has not reached Stop.
pub trait PathSetting: Send + Sync {
    /// Read the persisted directory, if any.
    fn load(&self) -> CoreResult<Option<PathBuf>>;

    /// Persist `log_dir`, or clear the setting with `None`.
    fn store(&self, log_dir: Option<&Path>) -> CoreResult<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_dir: Option<PathBuf>,
}

/// [`PathSetting`] backed by a small TOML key-value file.
///
/// Writes go to a temporary file that is then renamed over the original, so
/// a crash mid-write never leaves a half-written setting behind.
#[derive(Debug, Clone)]
pub struct TomlPathSetting {
    path: PathBuf,
}

impl TomlPathSetting {
    /// Setting stored at `path`. The file need not exist yet.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PathSetting for TomlPathSetting {
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&self) -> CoreResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| RecorderError::Setting {
            reason: format!("Failed to read setting: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let setting: PersistedSetting =
            toml::from_str(&contents).map_err(|e| RecorderError::Setting {
                reason: format!("Failed to parse setting: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(log_dir = ?setting.log_dir, "Durable path setting loaded");

        Ok(setting.log_dir)
    }

    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    fn store(&self, log_dir: Option<&Path>) -> CoreResult<()> {
        let setting = PersistedSetting {
            log_dir: log_dir.map(Path::to_path_buf),
        };

        let contents = toml::to_string_pretty(&setting).map_err(|e| RecorderError::Setting {
            reason: format!("Failed to serialize setting: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| RecorderError::Setting {
                reason: format!("Failed to create setting directory {:?}: {}", parent, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let temp_path = self.path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| RecorderError::Setting {
            reason: format!("Failed to create temp setting file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| RecorderError::Setting {
                reason: format!("Failed to write temp setting file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| RecorderError::Setting {
            reason: format!("Failed to sync temp setting file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &self.path).map_err(|e| RecorderError::Setting {
            reason: format!("Failed to rename temp setting to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(log_dir = ?log_dir, "Durable path setting saved");

        Ok(())
    }
}
