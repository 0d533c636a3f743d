use debug_recorder_core::{CoreResult, LogViewer, RecorderError};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Opens finished recordings with the platform file browser.
pub struct SystemViewer {
    enabled: bool,
}

impl SystemViewer {
    /// Viewer that only opens directories when `enabled`.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl LogViewer for SystemViewer {
    #[track_caller]
    #[instrument(skip(self))]
    fn open(&self, directory: &Path) -> CoreResult<()> {
        if !self.enabled {
            debug!(directory = ?directory, "Viewer disabled, not opening recording");
            return Ok(());
        }

        open::that_detached(directory).map_err(|e| RecorderError::Collaborator {
            collaborator: "log viewer",
            reason: format!("Failed to open {:?}: {}", directory, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(directory = ?directory, "Opened finished recording");

        Ok(())
    }
}
