use crate::{CoreResult, RecorderError};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{Local, NaiveDateTime};
use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

/// Lexicographically sortable, millisecond-resolution timestamp pattern.
pub const LOG_DIR_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S-%3f";

/// Mints `{cache_root}/debug/logs/{application_id}_{version_code}_{timestamp}` paths.
///
/// Timestamps are local time. Within one namer the minted timestamps never go
/// backwards, even if the wall clock does.
#[derive(Debug)]
pub struct LogDirNamer {
    logs_root: PathBuf,
    application_id: String,
    version_code: u64,
    last_minted: Mutex<Option<NaiveDateTime>>,
}

impl LogDirNamer {
    /// Namer rooted at `cache_root/debug/logs`.
    pub fn new<P: AsRef<Path>>(cache_root: P, application_id: &str, version_code: u64) -> Self {
        Self {
            logs_root: cache_root.as_ref().join("debug").join("logs"),
            application_id: application_id.to_string(),
            version_code,
            last_minted: Mutex::new(None),
        }
    }

    /// Parent directory of every minted recording directory.
    pub fn logs_root(&self) -> &Path {
        &self.logs_root
    }

    /// Mint a path for the current local time.
    pub fn mint(&self) -> PathBuf {
        self.mint_at(Local::now().naive_local())
    }

    /// Mint a path for `now`, clamped to the previously minted timestamp.
    pub fn mint_at(&self, now: NaiveDateTime) -> PathBuf {
        let mut last = self.last_minted.lock().unwrap_or_else(|e| e.into_inner());
        let timestamp = match *last {
            Some(previous) if previous > now => previous,
            _ => now,
        };
        *last = Some(timestamp);

        self.logs_root.join(self.dir_name(timestamp))
    }

    /// Directory name for `timestamp`.
    pub fn dir_name(&self, timestamp: NaiveDateTime) -> String {
        format!(
            "{}_{}_{}",
            self.application_id,
            self.version_code,
            timestamp.format(LOG_DIR_TIMESTAMP_FORMAT)
        )
    }

    /// Recover the timestamp from a directory name minted by this namer.
    pub fn parse_timestamp(&self, dir_name: &str) -> Option<NaiveDateTime> {
        let prefix = format!("{}_{}_", self.application_id, self.version_code);
        let timestamp = dir_name.strip_prefix(&prefix)?;
        NaiveDateTime::parse_from_str(timestamp, LOG_DIR_TIMESTAMP_FORMAT).ok()
    }
}

/// Create a recording directory and open its permissions for external tools.
///
/// Creation failure is fatal; a permission failure is only logged.
#[track_caller]
#[instrument]
pub fn create_log_dir(path: &Path) -> CoreResult<()> {
    fs::create_dir_all(path).map_err(|source| RecorderError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
        location: ErrorLocation::from(Location::caller()),
    })?;

    if let Err(e) = relax_permissions(path) {
        warn!(path = ?path, error = %e, "Failed to relax recording directory permissions");
    }

    debug!(path = ?path, "Recording directory ready");
    Ok(())
}

#[cfg(unix)]
fn relax_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
fn relax_permissions(path: &Path) -> std::io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}
