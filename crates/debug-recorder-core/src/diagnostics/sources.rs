use crate::CoreResult;

use std::sync::Arc;

/// Stable identifier of this installation.
pub trait InstallIdentity: Send + Sync {
    /// Return the install id, creating it if needed.
    fn install_id(&self) -> CoreResult<String>;
}

/// Discovers the data areas the application currently manages.
pub trait AreaDiscovery: Send + Sync {
    /// Identities of every managed area.
    fn discover(&self) -> CoreResult<Vec<String>>;
}

/// Application update history.
pub trait UpdateHistory: Send + Sync {
    /// Most recent entry, if any update was ever recorded.
    fn latest(&self) -> CoreResult<Option<String>>;
}

/// Build identifiers baked into the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Application identifier, also used in recording directory names.
    pub application_id: String,
    /// Monotonic build number.
    pub version_code: u64,
    /// Human-readable version.
    pub version_name: String,
}

/// Everything a [`DiagnosticSnapshot`](crate::DiagnosticSnapshot) reads from.
///
/// Absent collaborators are skipped.
#[derive(Clone)]
pub struct DiagnosticSources {
    pub(crate) build: BuildInfo,
    pub(crate) install: Option<Arc<dyn InstallIdentity>>,
    pub(crate) areas: Option<Arc<dyn AreaDiscovery>>,
    pub(crate) updates: Option<Arc<dyn UpdateHistory>>,
}

impl DiagnosticSources {
    /// Sources with only the build identifiers.
    pub fn new(build: BuildInfo) -> Self {
        Self {
            build,
            install: None,
            areas: None,
            updates: None,
        }
    }

    /// Attach an install identity source.
    pub fn with_install_identity(mut self, install: Arc<dyn InstallIdentity>) -> Self {
        self.install = Some(install);
        self
    }

    /// Attach a data area discovery source.
    pub fn with_area_discovery(mut self, areas: Arc<dyn AreaDiscovery>) -> Self {
        self.areas = Some(areas);
        self
    }

    /// Attach an update history source.
    pub fn with_update_history(mut self, updates: Arc<dyn UpdateHistory>) -> Self {
        self.updates = Some(updates);
        self
    }

    /// Build identifiers.
    pub fn build(&self) -> &BuildInfo {
        &self.build
    }
}
