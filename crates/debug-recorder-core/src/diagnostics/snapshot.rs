use crate::{CoreResult, diagnostics::DiagnosticSources};

use tracing::{info, instrument, warn};

/// Target under which snapshot facts are logged into the recording.
pub const DIAGNOSTICS_TARGET: &str = "diagnostics";

const LOCALE_VARIABLES: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// One collected environment fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticFact {
    /// Fact name.
    pub key: &'static str,
    /// Rendered value.
    pub value: String,
}

/// Environment, build and install facts captured once per Start.
///
/// Each fact is fetched independently. A fact whose source fails is logged
/// and left out; collection itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticSnapshot {
    facts: Vec<DiagnosticFact>,
}

impl DiagnosticSnapshot {
    /// Collect every fact, reading locales from the process environment.
    pub fn collect(sources: &DiagnosticSources) -> Self {
        Self::collect_with_env(sources, |key| std::env::var(key).ok())
    }

    /// Collect every fact with an explicit environment lookup.
    #[instrument(skip_all)]
    pub fn collect_with_env<F>(sources: &DiagnosticSources, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut snapshot = Self::default();
        let build = &sources.build;

        snapshot.push("os", std::env::consts::OS);
        snapshot.push("arch", std::env::consts::ARCH);
        snapshot.push("os_family", std::env::consts::FAMILY);
        snapshot.push("application_id", &build.application_id);
        snapshot.push("version_code", build.version_code.to_string());
        snapshot.push("version_name", &build.version_name);
        snapshot.push("recorder_version", env!("CARGO_PKG_VERSION"));

        if let Some(install) = &sources.install {
            snapshot.push_fallible("install_id", install.install_id());
        }

        let locales = active_locales(env);
        if !locales.is_empty() {
            snapshot.push("locales", locales.join(", "));
        }

        if let Some(areas) = &sources.areas {
            match areas.discover() {
                Ok(areas) => {
                    snapshot.push("data_area_count", areas.len().to_string());
                    snapshot.push("data_areas", areas.join(", "));
                }
                Err(e) => warn!(fact = "data_areas", error = %e, "Diagnostic fact unavailable"),
            }
        }

        if let Some(updates) = &sources.updates {
            match updates.latest() {
                Ok(Some(entry)) => snapshot.push("last_update", entry),
                Ok(None) => {}
                Err(e) => warn!(fact = "last_update", error = %e, "Diagnostic fact unavailable"),
            }
        }

        snapshot
    }

    /// All collected facts, in collection order.
    pub fn facts(&self) -> &[DiagnosticFact] {
        &self.facts
    }

    /// Value of the fact named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|fact| fact.key == key)
            .map(|fact| fact.value.as_str())
    }

    /// Write every fact to the log under [`DIAGNOSTICS_TARGET`].
    pub fn emit(&self) {
        info!(
            target: DIAGNOSTICS_TARGET,
            fact_count = self.facts.len(),
            "Diagnostic snapshot"
        );
        for fact in &self.facts {
            info!(
                target: DIAGNOSTICS_TARGET,
                fact = fact.key,
                value = %fact.value,
                "Diagnostic fact"
            );
        }
    }

    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.facts.push(DiagnosticFact {
            key,
            value: value.into(),
        });
    }

    fn push_fallible(&mut self, key: &'static str, value: CoreResult<String>) {
        match value {
            Ok(value) => self.push(key, value),
            Err(e) => warn!(fact = key, error = %e, "Diagnostic fact unavailable"),
        }
    }
}

/// Distinct locale names from the standard locale variables, highest priority first.
///
/// `LANGUAGE` may hold a colon-separated list. `C` and `POSIX` are skipped.
pub(crate) fn active_locales<F>(env: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut locales: Vec<String> = Vec::new();

    for variable in LOCALE_VARIABLES {
        let Some(value) = env(variable) else {
            continue;
        };
        for locale in value.split(':').map(str::trim) {
            if locale.is_empty() || locale == "C" || locale == "POSIX" {
                continue;
            }
            if !locales.iter().any(|known| known == locale) {
                locales.push(locale.to_string());
            }
        }
    }

    locales
}
