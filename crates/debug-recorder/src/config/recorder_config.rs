use crate::config::{
    default_application_id, default_await_timeout_secs, default_retry_delay_ms,
    default_version_code, default_version_name,
};

use std::time::Duration;

use debug_recorder_core::BuildInfo;
use serde::{Deserialize, Serialize};

/// Recorder identity and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Application identifier used in recording directory names.
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Build number used in recording directory names.
    #[serde(default = "default_version_code")]
    pub version_code: u64,

    /// Human-readable version reported in diagnostics.
    #[serde(default = "default_version_name")]
    pub version_name: String,

    /// Upper bound for start/stop requests.
    #[serde(default = "default_await_timeout_secs")]
    pub await_timeout_secs: Option<u64>,

    /// Pause before a failed transition is retried.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl RecorderConfig {
    /// Bound applied to start/stop requests.
    pub fn await_timeout(&self) -> Option<Duration> {
        self.await_timeout_secs.map(Duration::from_secs)
    }

    /// Delay between supervised retries.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Build identifiers for diagnostics and directory naming.
    pub fn build_info(&self) -> BuildInfo {
        BuildInfo {
            application_id: self.application_id.clone(),
            version_code: self.version_code,
            version_name: self.version_name.clone(),
        }
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            application_id: default_application_id(),
            version_code: default_version_code(),
            version_name: default_version_name(),
            await_timeout_secs: default_await_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}
