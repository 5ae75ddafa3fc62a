use tracing::{debug, warn};

use super::Resolver;
use crate::error::LookupError;
use crate::license::normalize::{normalize, normalize_str, UNKNOWN_LICENSE};
use crate::models::{Ecosystem, LicenseRecord, Resolution};
use crate::registry::{libraries_io, pypi};

impl Resolver {
    /// Resolve a Python package. The record's name is always `name` as given,
    /// even when an alias was queried.
    pub async fn resolve_python(&self, name: &str) -> LicenseRecord {
        let resolution = self.python_resolution(name).await;
        LicenseRecord::new(name, Ecosystem::Python, resolution)
    }

    async fn python_resolution(&self, name: &str) -> Resolution {
        let actual = self.catalog.python_alias(name);
        if actual != name {
            debug!(package = name, alias = actual, "using package alias");
        }

        if let Some(license) = self.catalog.standard_lib_license(actual) {
            return Resolution::from_license(license.to_string());
        }

        let Some(api_key) = self.api_key.as_deref() else {
            return Resolution::Failed(LookupError::Transport(
                "Libraries.io API key not configured".to_string(),
            ));
        };

        let project =
            match libraries_io::fetch_project(self.fetcher.as_ref(), &self.config, api_key, actual).await {
                Ok(project) => project,
                Err(err) => {
                    warn!(package = name, error = %err, "Libraries.io lookup failed");
                    return Resolution::Failed(err);
                }
            };

        let mut license = match project.normalized_license() {
            Some(normalized) => normalized.to_string(),
            None => normalize(project.raw_licenses()),
        };

        if license == UNKNOWN_LICENSE {
            if let Some(declared) = project.declared_license() {
                license = normalize_str(declared);
            }
        }

        if license == UNKNOWN_LICENSE {
            debug!(package = name, "no license on Libraries.io, falling back to PyPI");
            match pypi::fetch_declared_license(self.fetcher.as_ref(), &self.config, actual).await {
                Ok(declared) => license = normalize(declared.as_deref()),
                Err(err) => debug!(package = name, error = %err, "PyPI fallback failed"),
            }
        }

        Resolution::from_license(license)
    }
}
