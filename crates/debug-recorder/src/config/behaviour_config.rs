use crate::config::{default_notify_on_start, default_open_viewer_on_stop};

use serde::{Deserialize, Serialize};

/// Side effects around recording transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Open the finished recording directory when a recording stops.
    #[serde(default = "default_open_viewer_on_stop")]
    pub open_viewer_on_stop: bool,

    /// Show a desktop notification when a recording starts.
    #[serde(default = "default_notify_on_start")]
    pub notify_on_start: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            open_viewer_on_stop: default_open_viewer_on_stop(),
            notify_on_start: default_notify_on_start(),
        }
    }
}
