//! Activation requirements: minimum host-platform and runtime versions.
//!
//! When any check fails the caller surfaces the notice and performs no
//! further registration; nothing here is fatal to the host process.

use semver::Version;
use std::fmt::Write as _;

/// The environment the plugin is being activated into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    pub host_version: Version,
    pub runtime_version: Version,
}

/// Declarative minimum-version requirements for one product.
#[derive(Debug, Clone)]
pub struct Requirements {
    product: String,
    min_host: Option<Version>,
    min_runtime: Option<Version>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedCheck {
    pub requirement: &'static str,
    pub required: Version,
    pub found: Version,
}

/// Result of running every check; failures accumulate, they never abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsReport {
    product: String,
    failures: Vec<FailedCheck>,
}

impl Requirements {
    pub fn new(product: impl Into<String>) -> Self {
        Self { product: product.into(), min_host: None, min_runtime: None }
    }

    pub fn min_host(mut self, version: Version) -> Self {
        self.min_host = Some(version);
        self
    }

    pub fn min_runtime(mut self, version: Version) -> Self {
        self.min_runtime = Some(version);
        self
    }

    pub fn check(&self, env: &HostEnv) -> RequirementsReport {
        let mut failures = Vec::new();

        if let Some(required) = &self.min_host {
            if env.host_version < *required {
                failures.push(FailedCheck {
                    requirement: "host platform",
                    required: required.clone(),
                    found: env.host_version.clone(),
                });
            }
        }

        if let Some(required) = &self.min_runtime {
            if env.runtime_version < *required {
                failures.push(FailedCheck {
                    requirement: "runtime",
                    required: required.clone(),
                    found: env.runtime_version.clone(),
                });
            }
        }

        RequirementsReport { product: self.product.clone(), failures }
    }
}

impl RequirementsReport {
    pub fn satisfied(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[FailedCheck] {
        &self.failures
    }

    /// Renders the persistent admin notice listing every failed check.
    pub fn notice(&self) -> String {
        let mut notice = format!("{} cannot run on this site:", self.product);
        for failure in &self.failures {
            let _ = write!(
                notice,
                "\n - {} {} or newer is required, found {}",
                failure.requirement, failure.required, failure.found
            );
        }
        notice
    }
}

/// Parses a version that may omit minor or patch components, the way host
/// platforms report themselves ("5.3" rather than "5.3.0").
pub fn parse_version(text: &str) -> Option<Version> {
    let text = text.trim();
    if let Ok(version) = Version::parse(text) {
        return Some(version);
    }

    let mut parts = text.splitn(3, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |part| part.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |part| part.parse().ok())?;
    Some(Version::new(major, minor, patch))
}
