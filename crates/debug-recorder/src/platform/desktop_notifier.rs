use debug_recorder_core::{CoreResult, RecorderError, ServiceNotifier};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use notify_rust::Notification;
use tracing::{debug, info, instrument, warn};

const NOTIFICATION_SUMMARY: &str = "Debug recording started";

/// Announces active recordings with a desktop notification.
pub struct DesktopNotifier {
    enabled: bool,
    application_id: String,
}

impl DesktopNotifier {
    /// Notifier for `application_id` that only shows anything when `enabled`.
    pub fn new(enabled: bool, application_id: impl Into<String>) -> Self {
        Self {
            enabled,
            application_id: application_id.into(),
        }
    }
}

impl ServiceNotifier for DesktopNotifier {
    #[track_caller]
    #[instrument(skip(self))]
    fn recording_started(&self, directory: &Path) -> CoreResult<()> {
        if !self.enabled {
            debug!(directory = ?directory, "Notifications disabled");
            return Ok(());
        }

        let mut notification = Notification::new();
        notification.summary(NOTIFICATION_SUMMARY).body(&format!(
            "{} is recording into {}",
            self.application_id,
            directory.display()
        ));

        // show() waits on the notification daemon; keep that off the caller.
        let shown_for = directory.to_path_buf();
        std::thread::Builder::new()
            .name("recording-notifier".to_string())
            .spawn(move || match notification.show() {
                Ok(_handle) => debug!(directory = ?shown_for, "Notification delivered"),
                Err(e) => warn!(error = %e, directory = ?shown_for, "Failed to show notification"),
            })
            .map_err(|e| RecorderError::Collaborator {
                collaborator: "service notifier",
                reason: format!("Failed to spawn notification thread: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(directory = ?directory, "Recording notification dispatched");

        Ok(())
    }
}
