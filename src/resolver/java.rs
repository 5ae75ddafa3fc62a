use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::Resolver;
use crate::license::normalize::{normalize_str, UNKNOWN_LICENSE};
use crate::models::{Ecosystem, LicenseRecord, MavenVersion, Resolution};
use crate::registry::maven;

/// Separator between multiple licenses declared by one POM.
const LICENSE_SEPARATOR: &str = " / ";

impl Resolver {
    /// Resolve a Maven coordinate into a record named `group:artifact`.
    pub async fn resolve_java(&self, group: &str, artifact: &str, version: &MavenVersion) -> LicenseRecord {
        let (version_used, resolution) = self.java_resolution(group, artifact, version).await;
        LicenseRecord::new(format!("{}:{}", group, artifact), Ecosystem::Java, resolution)
            .with_coordinates(group, artifact)
            .with_version(version_used)
    }

    /// Map a Java import to Maven through the alias table and resolve its latest
    /// release. Imports without an alias are reported as `"Unknown"` under their
    /// package name, so classes from one package share a record.
    pub async fn resolve_java_import(&self, import: &str) -> LicenseRecord {
        match self.catalog.java_alias_for_import(import) {
            Some(alias) => {
                debug!(import, artifact = %alias.key(), "mapped import to Maven artifact");
                self.resolve_java(&alias.group, &alias.artifact, &MavenVersion::Latest)
                    .await
            }
            None => {
                debug!(import, "no Maven alias for import");
                LicenseRecord::new(import_package(import), Ecosystem::Java, Resolution::Unresolved)
                    .with_version("?")
            }
        }
    }

    /// Returns the version that produced the answer alongside the resolution.
    async fn java_resolution(
        &self,
        group: &str,
        artifact: &str,
        version: &MavenVersion,
    ) -> (String, Resolution) {
        let requested = match version {
            MavenVersion::Pinned(v) => v.clone(),
            MavenVersion::Latest => {
                match maven::search_latest_version(self.fetcher.as_ref(), &self.config, group, artifact).await {
                    Ok(Some(v)) => v,
                    Ok(None) => {
                        debug!(group, artifact, "search index has no latest version");
                        return (version.to_string(), Resolution::Unresolved);
                    }
                    Err(err) => {
                        warn!(group, artifact, error = %err, "latest version lookup failed");
                        return (version.to_string(), Resolution::Failed(err));
                    }
                }
            }
            MavenVersion::Unspecified => {
                match maven::fetch_metadata_latest(self.fetcher.as_ref(), &self.config, group, artifact).await {
                    Ok(Some(v)) => v,
                    result => {
                        let Some(known_good) = self.catalog.known_good_version(group, artifact) else {
                            warn!(group, artifact, "could not resolve a version");
                            let resolution = match result {
                                Err(err) => Resolution::Failed(err),
                                _ => Resolution::Unresolved,
                            };
                            return (version.to_string(), resolution);
                        };
                        known_good.to_string()
                    }
                }
            }
        };

        let first = self.descriptor_license(group, artifact, &requested).await;
        if first.is_resolved() {
            return (requested, first);
        }

        let fallback = self
            .catalog
            .known_good_version(group, artifact)
            .filter(|v| *v != requested);
        let Some(fallback) = fallback else {
            return (requested, first);
        };

        debug!(group, artifact, tried = %requested, fallback, "retrying with known-good version");
        let second = self.descriptor_license(group, artifact, fallback).await;
        match second {
            Resolution::Resolved(_) => (fallback.to_string(), second),
            Resolution::Failed(_) => (requested, second),
            Resolution::Unresolved => (requested, first),
        }
    }

    /// Licenses declared in one POM version, or the trusted override when it
    /// declares none.
    async fn descriptor_license(&self, group: &str, artifact: &str, version: &str) -> Resolution {
        let declared = match maven::fetch_descriptor(self.fetcher.as_ref(), &self.config, group, artifact, version)
            .await
            .and_then(|xml| maven::descriptor_licenses(&xml))
        {
            Ok(names) => joined_licenses(&names),
            Err(err) => {
                debug!(group, artifact, version, error = %err, "POM lookup failed");
                Resolution::Failed(err)
            }
        };

        if declared.is_resolved() {
            return declared;
        }

        match self.catalog.trusted_license(group, artifact) {
            Some(license) => {
                debug!(group, artifact, license, "using trusted license override");
                Resolution::from_license(normalize_str(license))
            }
            None => declared,
        }
    }
}

/// First three dotted segments of an import path.
fn import_package(import: &str) -> String {
    import.split('.').take(3).collect::<Vec<_>>().join(".")
}

/// Normalize each declared name, drop the unknown ones, and join the distinct
/// rest in sorted order.
fn joined_licenses(names: &[String]) -> Resolution {
    let licenses: BTreeSet<String> = names
        .iter()
        .map(|name| normalize_str(name))
        .filter(|license| license != UNKNOWN_LICENSE)
        .collect();

    if licenses.is_empty() {
        Resolution::Unresolved
    } else {
        Resolution::Resolved(licenses.into_iter().collect::<Vec<_>>().join(LICENSE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::LookupError;
    use crate::models::TrustRating;
    use crate::registry::stub::StubFetcher;
    use crate::resolver::test_support::resolver;

    const REPO: &str = "https://repo1.maven.org/maven2";
    const SEARCH: &str = "https://search.maven.org/solrsearch/select";

    fn pom_with_licenses(names: &[&str]) -> String {
        let licenses: String = names
            .iter()
            .map(|n| format!("<license><name>{}</name></license>", n))
            .collect();
        format!(
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0"><licenses>{}</licenses></project>"#,
            licenses
        )
    }

    fn pinned(v: &str) -> MavenVersion {
        MavenVersion::Pinned(v.to_string())
    }

    #[test]
    fn test_joined_licenses_sorted_and_distinct() {
        let names = vec![
            "MIT".to_string(),
            "Apache License 2.0".to_string(),
            "The MIT License".to_string(),
            "Some custom terms".to_string(),
        ];
        assert_eq!(
            joined_licenses(&names),
            Resolution::Resolved("Apache-2.0 / MIT".to_string())
        );
        assert_eq!(joined_licenses(&[]), Resolution::Unresolved);
    }

    #[tokio::test]
    async fn test_pinned_version_reads_pom_licenses() {
        let fetcher = Arc::new(StubFetcher::new().respond(
            &format!("{}/com/example/lib/1.0/lib-1.0.pom", REPO),
            200,
            &pom_with_licenses(&["MIT", "Apache License 2.0"]),
        ));
        let record = resolver(fetcher).resolve_java("com.example", "lib", &pinned("1.0")).await;

        assert_eq!(record.name, "com.example:lib");
        assert_eq!(record.license, "Apache-2.0 / MIT");
        assert_eq!(record.rating, TrustRating::Trusted);
        assert_eq!(record.version.as_deref(), Some("1.0"));
        assert_eq!(record.key(), "com.example:lib");
    }

    #[tokio::test]
    async fn test_latest_uses_search_result() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .respond(SEARCH, 200, r#"{"response": {"docs": [{"latestVersion": "2.11.0"}]}}"#)
                .respond(
                    &format!("{}/com/google/code/gson/gson/2.11.0/gson-2.11.0.pom", REPO),
                    200,
                    &pom_with_licenses(&["Apache-2.0"]),
                ),
        );
        let record = resolver(fetcher)
            .resolve_java("com.google.code.gson", "gson", &MavenVersion::Latest)
            .await;
        assert_eq!(record.license, "Apache-2.0");
        assert_eq!(record.version.as_deref(), Some("2.11.0"));
    }

    #[tokio::test]
    async fn test_failed_latest_lookup_stops_immediately() {
        let fetcher = Arc::new(StubFetcher::new().fail(SEARCH, LookupError::Transport("timeout".into())));
        // jackson-databind has a known-good version; it must not be tried.
        let record = resolver(fetcher.clone())
            .resolve_java("com.fasterxml.jackson.core", "jackson-databind", &MavenVersion::Latest)
            .await;

        assert_eq!(record.license, "Unknown");
        assert_eq!(record.error.as_deref(), Some("transport error: timeout"));
        assert_eq!(fetcher.call_count(REPO), 0);
    }

    #[tokio::test]
    async fn test_empty_search_result_is_unknown() {
        let fetcher = Arc::new(StubFetcher::new().respond(SEARCH, 200, r#"{"response": {"docs": []}}"#));
        let record = resolver(fetcher.clone())
            .resolve_java("com.nobody", "nothing", &MavenVersion::Latest)
            .await;
        assert_eq!(record.license, "Unknown");
        assert!(record.error.is_none());
        assert_eq!(fetcher.call_count(REPO), 0);
    }

    #[tokio::test]
    async fn test_trusted_override_when_pom_has_no_licenses() {
        let fetcher = Arc::new(StubFetcher::new().respond(
            &format!("{}/org/slf4j/slf4j-api/2.0.0/slf4j-api-2.0.0.pom", REPO),
            200,
            "<project><licenses/></project>",
        ));
        let record = resolver(fetcher.clone())
            .resolve_java("org.slf4j", "slf4j-api", &pinned("2.0.0"))
            .await;
        assert_eq!(record.license, "MIT");
        assert_eq!(fetcher.call_count(REPO), 1);
    }

    #[tokio::test]
    async fn test_known_good_version_retry() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .respond(
                    &format!("{}/com/fasterxml/jackson/core/jackson-databind/2.17.0/", REPO),
                    200,
                    "<project/>",
                )
                .respond(
                    &format!("{}/com/fasterxml/jackson/core/jackson-databind/2.15.0/", REPO),
                    200,
                    &pom_with_licenses(&["The Apache Software License, Version 2.0"]),
                ),
        );
        let record = resolver(fetcher.clone())
            .resolve_java("com.fasterxml.jackson.core", "jackson-databind", &pinned("2.17.0"))
            .await;

        assert_eq!(record.license, "Apache-2.0");
        assert_eq!(record.version.as_deref(), Some("2.15.0"));
        assert_eq!(fetcher.call_count(REPO), 2);
    }

    #[tokio::test]
    async fn test_no_retry_when_fallback_equals_tried_version() {
        let fetcher = Arc::new(StubFetcher::new().respond(REPO, 200, "<project/>"));
        let record = resolver(fetcher.clone())
            .resolve_java("com.fasterxml.jackson.core", "jackson-databind", &pinned("2.15.0"))
            .await;

        assert_eq!(record.license, "Unknown");
        assert!(record.error.is_none());
        assert_eq!(fetcher.call_count(REPO), 1);
    }

    #[tokio::test]
    async fn test_missing_pom_reports_status() {
        let fetcher = Arc::new(StubFetcher::new());
        let record = resolver(fetcher)
            .resolve_java("com.example", "gone", &pinned("9.9"))
            .await;
        assert_eq!(record.license, "Unknown");
        assert_eq!(record.error.as_deref(), Some("HTTP 404"));
    }

    #[tokio::test]
    async fn test_unspecified_version_uses_metadata() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .respond(
                    &format!("{}/org/json/json/maven-metadata.xml", REPO),
                    200,
                    "<metadata><versioning><latest>20240303</latest></versioning></metadata>",
                )
                .respond(
                    &format!("{}/org/json/json/20240303/json-20240303.pom", REPO),
                    200,
                    &pom_with_licenses(&["Public Domain"]),
                ),
        );
        let record = resolver(fetcher)
            .resolve_java("org.json", "json", &MavenVersion::Unspecified)
            .await;
        assert_eq!(record.version.as_deref(), Some("20240303"));
        // "Public Domain" is not in the normalization table.
        assert_eq!(record.license, "Unknown");
    }

    #[tokio::test]
    async fn test_unspecified_version_falls_back_to_known_good_when_metadata_missing() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .respond(
                    &format!("{}/com/fasterxml/jackson/core/jackson-databind/maven-metadata.xml", REPO),
                    404,
                    "",
                )
                .respond(
                    &format!(
                        "{}/com/fasterxml/jackson/core/jackson-databind/2.15.0/jackson-databind-2.15.0.pom",
                        REPO
                    ),
                    200,
                    &pom_with_licenses(&["The Apache Software License, Version 2.0"]),
                ),
        );
        let record = resolver(fetcher.clone())
            .resolve_java("com.fasterxml.jackson.core", "jackson-databind", &MavenVersion::Unspecified)
            .await;

        assert_eq!(record.version.as_deref(), Some("2.15.0"));
        assert_eq!(record.license, "Apache-2.0");
        assert!(record.error.is_none());
        assert_eq!(fetcher.call_count(REPO), 2);
    }

    #[tokio::test]
    async fn test_unspecified_version_without_metadata_or_fallback_is_unknown() {
        let fetcher = Arc::new(StubFetcher::new());
        let record = resolver(fetcher.clone())
            .resolve_java("com.example", "orphan", &MavenVersion::Unspecified)
            .await;

        assert_eq!(record.license, "Unknown");
        assert_eq!(record.error.as_deref(), Some("HTTP 404"));
        assert_eq!(record.version.as_deref(), Some("?"));
        assert_eq!(fetcher.call_count(REPO), 1);
    }

    #[test]
    fn test_import_package_keeps_three_segments() {
        assert_eq!(import_package("com.acme.internal.Widget"), "com.acme.internal");
        assert_eq!(import_package("okhttp3.OkHttpClient"), "okhttp3.OkHttpClient");
    }

    #[tokio::test]
    async fn test_import_resolves_through_longest_alias() {
        let fetcher = Arc::new(
            StubFetcher::new()
                .respond(SEARCH, 200, r#"{"response": {"docs": [{"latestVersion": "3.14.0"}]}}"#)
                .respond(
                    &format!("{}/org/apache/commons/commons-lang3/3.14.0/", REPO),
                    200,
                    &pom_with_licenses(&["Apache-2.0"]),
                ),
        );
        let record = resolver(fetcher)
            .resolve_java_import("org.apache.commons.lang3.StringUtils")
            .await;

        assert_eq!(record.name, "org.apache.commons:commons-lang3");
        assert_eq!(record.license, "Apache-2.0");
        assert_eq!(record.rating, TrustRating::Trusted);
    }

    #[tokio::test]
    async fn test_unaliased_import_is_unknown_without_lookups() {
        let fetcher = Arc::new(StubFetcher::new());
        let record = resolver(fetcher.clone())
            .resolve_java_import("com.acme.internal.Widget")
            .await;

        assert_eq!(record.name, "com.acme.internal");
        assert_eq!(record.license, "Unknown");
        assert_eq!(record.rating, TrustRating::Risky);
        assert!(record.group.is_none());
        assert!(fetcher.calls().is_empty());
    }
}
