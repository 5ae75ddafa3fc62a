//! Static lookup tables: Python aliases and pinned standard-library licenses,
//! Java import aliases, known-good versions and trusted license overrides.
//!
//! A [`Catalog`] is built once from the built-ins plus any config entries and
//! is read-only afterwards.

use std::collections::HashMap;

use tracing::warn;

use crate::config::Settings;

const PYTHON_ALIASES: &[(&str, &str)] = &[
    ("sklearn", "scikit-learn"),
    ("dateutil", "python-dateutil"),
    ("yaml", "PyYAML"),
    ("PIL", "Pillow"),
    ("cv2", "opencv-python"),
    ("bs4", "beautifulsoup4"),
];

const STANDARD_LIBS: &[&str] = &[
    "__future__", "abc", "argparse", "ast", "asyncio", "base64", "bisect", "collections",
    "contextlib", "copy", "csv", "dataclasses", "datetime", "decimal", "email", "enum",
    "fractions", "functools", "glob", "gzip", "hashlib", "heapq", "http", "importlib",
    "inspect", "io", "itertools", "json", "logging", "math", "operator", "os", "pathlib",
    "pickle", "platform", "queue", "random", "re", "shutil", "signal", "socket", "sqlite3",
    "statistics", "string", "struct", "subprocess", "sys", "tempfile", "textwrap",
    "threading", "time", "traceback", "typing", "unittest", "urllib", "uuid", "warnings",
    "xml", "zipfile",
];

const STANDARD_LIB_LICENSE: &str = "PSF-2.0";

const JAVA_IMPORT_ALIASES: &[(&str, (&str, &str))] = &[
    // JSON & serialization
    ("com.google.gson", ("com.google.code.gson", "gson")),
    ("com.fasterxml.jackson", ("com.fasterxml.jackson.core", "jackson-databind")),
    ("org.json", ("org.json", "json")),
    // Apache Commons
    ("org.apache.commons.lang3", ("org.apache.commons", "commons-lang3")),
    ("org.apache.commons", ("org.apache.commons", "commons-lang3")),
    ("org.apache.commons.io", ("org.apache.commons", "commons-io")),
    ("org.apache.commons.codec", ("commons-codec", "commons-codec")),
    ("org.apache.commons.collections4", ("org.apache.commons", "commons-collections4")),
    // Logging
    ("org.slf4j", ("org.slf4j", "slf4j-api")),
    ("org.slf4j.impl", ("org.slf4j", "slf4j-simple")),
    ("ch.qos.logback", ("ch.qos.logback", "logback-classic")),
    ("org.apache.logging.log4j", ("org.apache.logging.log4j", "log4j-core")),
    // Testing
    ("org.junit", ("junit", "junit")),
    ("org.junit.jupiter", ("org.junit.jupiter", "junit-jupiter-api")),
    ("org.mockito", ("org.mockito", "mockito-core")),
    // Spring
    ("org.springframework", ("org.springframework", "spring-context")),
    ("org.springframework.boot", ("org.springframework.boot", "spring-boot-starter")),
    ("org.springframework.web", ("org.springframework", "spring-web")),
    // Database & ORM
    ("org.hibernate", ("org.hibernate", "hibernate-core")),
    ("javax.persistence", ("javax.persistence", "javax.persistence-api")),
    ("com.zaxxer.hikari", ("com.zaxxer", "HikariCP")),
    // HTTP clients
    ("org.apache.http", ("org.apache.httpcomponents", "httpclient")),
    ("okhttp3", ("com.squareup.okhttp3", "okhttp")),
    ("retrofit2", ("com.squareup.retrofit2", "retrofit")),
    // Google
    ("com.google.common", ("com.google.guava", "guava")),
    ("com.google.api.client", ("com.google.api-client", "google-api-client")),
    // AWS SDK
    ("com.amazonaws.services.s3", ("com.amazonaws", "aws-java-sdk-s3")),
    ("com.amazonaws.auth", ("com.amazonaws", "aws-java-sdk-core")),
    // XML
    ("javax.xml.bind", ("javax.xml.bind", "jaxb-api")),
    // Misc
    ("kotlin.jvm", ("org.jetbrains.kotlin", "kotlin-stdlib")),
    ("com.networknt.schema", ("com.networknt", "json-schema-validator")),
    ("javax.servlet", ("javax.servlet", "javax.servlet-api")),
    ("jakarta.servlet", ("jakarta.servlet", "jakarta.servlet-api")),
    ("org.flywaydb.core", ("org.flywaydb", "flyway-core")),
];

const KNOWN_GOOD_JAVA_VERSIONS: &[(&str, &str)] = &[
    ("com.fasterxml.jackson.core:jackson-databind", "2.15.0"),
    ("com.google.code.gson:gson", "2.10.1"),
    ("org.slf4j:slf4j-api", "1.7.36"),
    ("org.junit.jupiter:junit-jupiter-api", "5.9.3"),
    ("com.squareup.okhttp3:okhttp", "4.12.0"),
    ("org.apache.commons:commons-lang3", "3.12.0"),
];

const TRUSTED_LICENSES: &[(&str, &str)] = &[
    ("org.slf4j:slf4j-api", "MIT"),
    ("org.apache.commons:commons-lang3", "Apache-2.0"),
];

/// A Maven `group:artifact` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenArtifact {
    pub group: String,
    pub artifact: String,
}

impl MavenArtifact {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        MavenArtifact {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    /// Parse `"group:artifact"`.
    pub fn parse(coords: &str) -> Option<Self> {
        let (group, artifact) = coords.split_once(':')?;
        let (group, artifact) = (group.trim(), artifact.trim());
        if group.is_empty() || artifact.is_empty() {
            return None;
        }
        Some(MavenArtifact::new(group, artifact))
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    python_aliases: HashMap<String, String>,
    standard_libs: HashMap<String, String>,
    java_aliases: HashMap<String, MavenArtifact>,
    known_good_versions: HashMap<String, String>,
    trusted_licenses: HashMap<String, String>,
}

impl Catalog {
    /// Built-in tables only.
    pub fn builtin() -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>()
        };

        Catalog {
            python_aliases: to_map(PYTHON_ALIASES),
            standard_libs: STANDARD_LIBS
                .iter()
                .map(|m| (m.to_string(), STANDARD_LIB_LICENSE.to_string()))
                .collect(),
            java_aliases: JAVA_IMPORT_ALIASES
                .iter()
                .map(|(prefix, (g, a))| (prefix.to_string(), MavenArtifact::new(*g, *a)))
                .collect(),
            known_good_versions: to_map(KNOWN_GOOD_JAVA_VERSIONS),
            trusted_licenses: to_map(TRUSTED_LICENSES),
        }
    }

    /// Built-ins overlaid with the config file's tables; config entries win.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut catalog = Catalog::builtin();

        catalog.python_aliases.extend(settings.python.aliases.clone());
        catalog.standard_libs.extend(settings.python.standard_libs.clone());
        for (prefix, coords) in &settings.java.aliases {
            match MavenArtifact::parse(coords) {
                Some(artifact) => {
                    catalog.java_aliases.insert(prefix.clone(), artifact);
                }
                None => warn!(prefix = %prefix, value = %coords, "ignoring Java alias, expected \"group:artifact\""),
            }
        }
        catalog
            .known_good_versions
            .extend(settings.java.known_good_versions.clone());
        catalog
            .trusted_licenses
            .extend(settings.java.trusted_licenses.clone());
        catalog
    }

    /// PyPI project name to query for an imported module name.
    pub fn python_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.python_aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn standard_lib_license(&self, name: &str) -> Option<&str> {
        self.standard_libs.get(name).map(String::as_str)
    }

    /// Maven artifact for a Java import, using the longest matching prefix.
    pub fn java_alias_for_import(&self, import: &str) -> Option<&MavenArtifact> {
        self.java_aliases
            .iter()
            .filter(|(prefix, _)| import.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, artifact)| artifact)
    }

    pub fn known_good_version(&self, group: &str, artifact: &str) -> Option<&str> {
        self.known_good_versions
            .get(&format!("{}:{}", group, artifact))
            .map(String::as_str)
    }

    pub fn trusted_license(&self, group: &str, artifact: &str) -> Option<&str> {
        self.trusted_licenses
            .get(&format!("{}:{}", group, artifact))
            .map(String::as_str)
    }
}
