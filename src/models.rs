use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::license::normalize::UNKNOWN_LICENSE;

/// One external library referenced by the scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coordinate {
    /// A PyPI package, named as it was imported (e.g. `sklearn`).
    Python { name: String },
    /// A Maven artifact.
    Maven {
        group: String,
        artifact: String,
        version: MavenVersion,
    },
    /// A raw Java import path, mapped to Maven through the alias table.
    JavaImport { path: String },
}

impl Coordinate {
    pub fn python(name: impl Into<String>) -> Self {
        Coordinate::Python { name: name.into() }
    }

    pub fn maven(group: impl Into<String>, artifact: impl Into<String>, version: MavenVersion) -> Self {
        Coordinate::Maven {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    pub fn java_import(path: impl Into<String>) -> Self {
        Coordinate::JavaImport { path: path.into() }
    }

    pub fn ecosystem(&self) -> Ecosystem {
        match self {
            Coordinate::Python { .. } => Ecosystem::Python,
            Coordinate::Maven { .. } | Coordinate::JavaImport { .. } => Ecosystem::Java,
        }
    }
}

/// Version part of a Maven coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MavenVersion {
    Pinned(String),
    /// Ask the search index for the newest release.
    Latest,
    /// The descriptor did not say; resolved through `maven-metadata.xml`.
    Unspecified,
}

impl MavenVersion {
    /// Interpret a `<version>` element. Property placeholders count as missing.
    pub fn from_declared(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("latest") => MavenVersion::Latest,
            Some(v) if !v.is_empty() && !v.contains("${") => MavenVersion::Pinned(v.to_string()),
            _ => MavenVersion::Unspecified,
        }
    }
}

impl std::fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MavenVersion::Pinned(v) => write!(f, "{}", v),
            MavenVersion::Latest => write!(f, "latest"),
            MavenVersion::Unspecified => write!(f, "?"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ecosystem {
    Python,
    Java,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Python => write!(f, "Python"),
            Ecosystem::Java => write!(f, "Java"),
        }
    }
}

/// Coarse trust tier assigned to a license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrustRating {
    Trusted,
    Caution,
    Risky,
    /// Nothing in the license string matched a known keyword.
    Unknown,
}

impl std::fmt::Display for TrustRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrustRating::Trusted => write!(f, "Trusted"),
            TrustRating::Caution => write!(f, "Caution"),
            TrustRating::Risky => write!(f, "Risky"),
            TrustRating::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Outcome of resolving one coordinate against the registries.
///
/// Keeps "we looked and found nothing" apart from "the lookup failed".
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(String),
    Unresolved,
    Failed(LookupError),
}

impl Resolution {
    /// Wrap a normalized license, mapping the `"Unknown"` sentinel to `Unresolved`.
    pub fn from_license(license: String) -> Self {
        if license == UNKNOWN_LICENSE {
            Resolution::Unresolved
        } else {
            Resolution::Resolved(license)
        }
    }

    pub fn license(&self) -> &str {
        match self {
            Resolution::Resolved(license) => license,
            Resolution::Unresolved | Resolution::Failed(_) => UNKNOWN_LICENSE,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Final per-dependency result, as rendered in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    /// Identifier as the caller supplied it (never the aliased name).
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
    pub ecosystem: Ecosystem,
    pub license: String,
    pub rating: TrustRating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LicenseRecord {
    /// Build a record for `name`, rating whatever license the resolution carries.
    pub fn new(name: impl Into<String>, ecosystem: Ecosystem, resolution: Resolution) -> Self {
        let license = resolution.license().to_string();
        let rating = crate::license::classifier::rate(&license);
        let error = match resolution {
            Resolution::Failed(err) => Some(err.to_string()),
            _ => None,
        };
        LicenseRecord {
            name: name.into(),
            version: None,
            group: None,
            artifact: None,
            ecosystem,
            license,
            rating,
            error,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_coordinates(mut self, group: impl Into<String>, artifact: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self.artifact = Some(artifact.into());
        self
    }

    /// Deduplication key: `group:artifact` when both are known, else the name.
    pub fn key(&self) -> String {
        match (&self.group, &self.artifact) {
            (Some(group), Some(artifact)) => format!("{}:{}", group, artifact),
            _ => self.name.clone(),
        }
    }

    pub fn has_known_license(&self) -> bool {
        self.license != UNKNOWN_LICENSE
    }
}
