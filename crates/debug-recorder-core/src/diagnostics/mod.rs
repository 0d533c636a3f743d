mod snapshot;
mod sources;

#[cfg(test)]
pub(crate) use snapshot::active_locales;

pub use {
    snapshot::{DIAGNOSTICS_TARGET, DiagnosticFact, DiagnosticSnapshot},
    sources::{AreaDiscovery, BuildInfo, DiagnosticSources, InstallIdentity, UpdateHistory},
};
