use crate::{CoreResult, RecorderError};

use std::{
    fs,
    io::ErrorKind,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// File whose existence means "recording requested".
pub const SENTINEL_FILE_NAME: &str = "force_debug_run";

/// Which candidate directory the sentinel resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelLocation {
    /// The application-private directory.
    Private,
    /// The well-known path derived from the application id.
    Fallback,
}

/// Filesystem marker that requests recording without any API call.
#[derive(Debug, Clone)]
pub struct SentinelTrigger {
    path: PathBuf,
}

impl SentinelTrigger {
    /// Sentinel at `dir/force_debug_run`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(SENTINEL_FILE_NAME),
        }
    }

    /// Resolve the sentinel directory and build a trigger in it.
    ///
    /// See [`resolve_sentinel_dir`].
    #[track_caller]
    pub fn resolve(
        private_dir: Option<&Path>,
        fallback_root: &Path,
        application_id: &str,
    ) -> CoreResult<(Self, SentinelLocation)> {
        let (dir, location) = resolve_sentinel_dir(private_dir, fallback_root, application_id)?;
        Ok((Self::in_dir(dir), location))
    }

    /// Full path of the marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the marker currently exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the marker if absent. Returns `true` if it was created.
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn ensure(&self) -> CoreResult<bool> {
        if self.exists() {
            return Ok(false);
        }

        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|source| RecorderError::Sentinel {
                path: self.path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Sentinel trigger created");
        Ok(true)
    }

    /// Delete the marker. Returns `true` if a file was removed.
    ///
    /// A missing marker is not an error.
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    pub fn remove(&self) -> CoreResult<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Sentinel trigger removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(RecorderError::Sentinel {
                path: self.path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Pick the directory that holds the sentinel.
///
/// 1. The private directory, when given and creatable.
/// 2. Otherwise `fallback_root/application_id`.
#[track_caller]
#[instrument(skip(private_dir, fallback_root))]
pub fn resolve_sentinel_dir(
    private_dir: Option<&Path>,
    fallback_root: &Path,
    application_id: &str,
) -> CoreResult<(PathBuf, SentinelLocation)> {
    let private_failure = match private_dir {
        Some(dir) => match fs::create_dir_all(dir) {
            Ok(()) => {
                debug!(dir = ?dir, "Using private sentinel directory");
                return Ok((dir.to_path_buf(), SentinelLocation::Private));
            }
            Err(e) => {
                warn!(dir = ?dir, error = %e, "Private sentinel directory unusable, falling back");
                format!("private directory {:?}: {}", dir, e)
            }
        },
        None => "no private directory available".to_string(),
    };

    let fallback = fallback_root.join(application_id);
    match fs::create_dir_all(&fallback) {
        Ok(()) => {
            debug!(dir = ?fallback, "Using fallback sentinel directory");
            Ok((fallback, SentinelLocation::Fallback))
        }
        Err(e) => Err(RecorderError::SentinelUnavailable {
            reason: format!(
                "{}; fallback directory {:?}: {}",
                private_failure, fallback, e
            ),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
