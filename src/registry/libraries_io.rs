use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{url_with_query, HttpFetch};
use crate::config::RegistryConfig;
use crate::error::LookupError;

/// License fields of a Libraries.io project. Shapes vary between projects,
/// so the fields are kept loose and read through the accessors.
#[derive(Debug, Default, Deserialize)]
pub struct LibrariesIoProject {
    #[serde(default)]
    normalized_licenses: Value,
    #[serde(default)]
    licenses: Value,
    #[serde(default)]
    declared_licenses: Value,
}

impl LibrariesIoProject {
    /// First entry of `normalized_licenses`, unless it is the `"Other"` sentinel.
    pub fn normalized_license(&self) -> Option<&str> {
        first_str(&self.normalized_licenses).filter(|l| *l != "Other")
    }

    /// Free-text `licenses` field.
    pub fn raw_licenses(&self) -> Option<&str> {
        self.licenses.as_str().filter(|s| !s.trim().is_empty())
    }

    /// First entry of `declared_licenses`.
    pub fn declared_license(&self) -> Option<&str> {
        first_str(&self.declared_licenses)
    }
}

fn first_str(value: &Value) -> Option<&str> {
    value.as_array()?.first()?.as_str()
}

/// Look up a PyPI project on Libraries.io.
///
/// Fails with [`LookupError::Status`] on a non-success response.
pub async fn fetch_project(
    fetcher: &dyn HttpFetch,
    config: &RegistryConfig,
    api_key: &str,
    name: &str,
) -> Result<LibrariesIoProject, LookupError> {
    let base = format!("{}/pypi/{}", config.libraries_io_url.trim_end_matches('/'), name);
    let url = url_with_query(&base, &[("api_key", api_key)])?;

    debug!(package = name, "querying Libraries.io");
    let response = fetcher.get(&url).await?.success()?;
    response.json()
}
