use serde::Deserialize;
use tracing::debug;

use super::{url_with_query, HttpFetch};
use crate::config::RegistryConfig;
use crate::error::LookupError;
use crate::pom::{latest_version_from_metadata, PomDescriptor};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    #[serde(rename = "latestVersion")]
    latest_version: Option<String>,
}

/// Ask the Maven Central search index for an artifact's latest version.
///
/// `Ok(None)` when the index has no matching document.
pub async fn search_latest_version(
    fetcher: &dyn HttpFetch,
    config: &RegistryConfig,
    group: &str,
    artifact: &str,
) -> Result<Option<String>, LookupError> {
    let query = format!("g:\"{}\" AND a:\"{}\"", group, artifact);
    let url = url_with_query(
        &config.maven_search_url,
        &[("q", query.as_str()), ("rows", "1"), ("wt", "json")],
    )?;

    debug!(group, artifact, "searching Maven Central for latest version");
    let response = fetcher.get(&url).await?.success()?;
    let search: SearchResponse = response.json()?;

    Ok(search
        .response
        .docs
        .into_iter()
        .next()
        .and_then(|doc| doc.latest_version)
        .filter(|v| !v.is_empty()))
}

/// Fetch the raw POM for one artifact version.
pub async fn fetch_descriptor(
    fetcher: &dyn HttpFetch,
    config: &RegistryConfig,
    group: &str,
    artifact: &str,
    version: &str,
) -> Result<String, LookupError> {
    let url = format!(
        "{}/{}/{}/{}/{}-{}.pom",
        config.maven_repo_url.trim_end_matches('/'),
        group.replace('.', "/"),
        artifact,
        version,
        artifact,
        version
    );

    debug!(group, artifact, version, "fetching POM");
    Ok(fetcher.get(&url).await?.success()?.body)
}

/// Latest version listed in the artifact's `maven-metadata.xml`.
pub async fn fetch_metadata_latest(
    fetcher: &dyn HttpFetch,
    config: &RegistryConfig,
    group: &str,
    artifact: &str,
) -> Result<Option<String>, LookupError> {
    let url = format!(
        "{}/{}/{}/maven-metadata.xml",
        config.maven_repo_url.trim_end_matches('/'),
        group.replace('.', "/"),
        artifact
    );

    debug!(group, artifact, "fetching maven-metadata.xml");
    let response = fetcher.get(&url).await?.success()?;
    Ok(latest_version_from_metadata(&response.body)?)
}

/// All `<license><name>` entries of a POM.
pub fn descriptor_licenses(pom_xml: &str) -> Result<Vec<String>, LookupError> {
    Ok(PomDescriptor::parse(pom_xml)?.licenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::stub::StubFetcher;

    #[test]
    fn test_descriptor_licenses() {
        let pom = r#"<?xml version="1.0"?>
<project>
  <licenses>
    <license>
      <name>Apache License, Version 2.0</name>
      <url>https://www.apache.org/licenses/LICENSE-2.0</url>
    </license>
  </licenses>
</project>"#;
        assert_eq!(
            descriptor_licenses(pom).unwrap(),
            vec!["Apache License, Version 2.0".to_string()]
        );
    }

    #[tokio::test]
    async fn test_descriptor_url_layout() {
        let config = RegistryConfig::default();
        let fetcher = StubFetcher::new().respond(
            "https://repo1.maven.org/maven2/org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0.pom",
            200,
            "<project/>",
        );
        let body = fetch_descriptor(&fetcher, &config, "org.apache.commons", "commons-lang3", "3.12.0")
            .await
            .unwrap();
        assert_eq!(body, "<project/>");
    }

    #[tokio::test]
    async fn test_missing_descriptor_is_status_error() {
        let config = RegistryConfig::default();
        let fetcher = StubFetcher::new();
        let err = fetch_descriptor(&fetcher, &config, "a.b", "c", "1.0").await.unwrap_err();
        assert_eq!(err, LookupError::Status(404));
    }

    #[tokio::test]
    async fn test_search_takes_first_doc() {
        let config = RegistryConfig::default();
        let fetcher = StubFetcher::new().respond(
            "https://search.maven.org/solrsearch/select",
            200,
            r#"{"response": {"numFound": 2, "docs": [{"latestVersion": "2.0.13"}, {"latestVersion": "1.0"}]}}"#,
        );
        let version = search_latest_version(&fetcher, &config, "org.slf4j", "slf4j-api")
            .await
            .unwrap();
        assert_eq!(version.as_deref(), Some("2.0.13"));
    }

    #[tokio::test]
    async fn test_search_without_docs() {
        let config = RegistryConfig::default();
        let fetcher = StubFetcher::new().respond(
            "https://search.maven.org/solrsearch/select",
            200,
            r#"{"response": {"numFound": 0, "docs": []}}"#,
        );
        let version = search_latest_version(&fetcher, &config, "x", "y").await.unwrap();
        assert_eq!(version, None);
    }

    #[tokio::test]
    async fn test_metadata_latest() {
        let config = RegistryConfig::default();
        let fetcher = StubFetcher::new().respond(
            "https://repo1.maven.org/maven2/org/slf4j/slf4j-api/maven-metadata.xml",
            200,
            "<metadata><versioning><latest>2.0.13</latest></versioning></metadata>",
        );
        let version = fetch_metadata_latest(&fetcher, &config, "org.slf4j", "slf4j-api")
            .await
            .unwrap();
        assert_eq!(version.as_deref(), Some("2.0.13"));
    }
}
