use tracing::debug;

use super::HttpFetch;
use crate::config::RegistryConfig;
use crate::error::LookupError;

const LICENSE_CLASSIFIER_PREFIX: &str = "License :: ";

/// Fetch the declared license of a Python package from PyPI.
///
/// Tries `info.license`, then `info.license_expression`, then the last
/// segment of the first `License ::` trove classifier. Returns `Ok(None)`
/// when the package is missing or declares nothing.
pub async fn fetch_declared_license(
    fetcher: &dyn HttpFetch,
    config: &RegistryConfig,
    name: &str,
) -> Result<Option<String>, LookupError> {
    let url = format!("{}/{}/json", config.pypi_url.trim_end_matches('/'), name);

    debug!(package = name, "querying PyPI");
    let response = fetcher.get(&url).await?;
    if !response.is_success() {
        return Ok(None);
    }

    let data: serde_json::Value = response.json()?;
    Ok(declared_license(&data))
}

fn declared_license(data: &serde_json::Value) -> Option<String> {
    let info = data.get("info")?;

    let field = |key: &str| {
        info.get(key)
            .and_then(|l| l.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    field("license").or_else(|| field("license_expression")).or_else(|| {
        info.get("classifiers")?
            .as_array()?
            .iter()
            .filter_map(|c| c.as_str())
            .find(|c| c.starts_with(LICENSE_CLASSIFIER_PREFIX))
            .and_then(|c| c.rsplit(" :: ").next())
            .map(str::to_string)
    })
}
