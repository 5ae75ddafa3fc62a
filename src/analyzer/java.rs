use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::{Coordinate, MavenVersion};
use crate::pom::PomDescriptor;

/// JDK packages ship with the platform and are never third-party.
const JDK_PREFIXES: &[&str] = &["java.", "jdk."];

/// Analyzer for Java source files.
///
/// Each `import` is kept as its full dotted path (`static` stripped) so the
/// alias lookup can pick the most specific prefix, e.g.
/// `org.apache.commons.io.FileUtils` → `org.apache.commons.io`.
pub struct JavaSourceAnalyzer;

impl JavaSourceAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for JavaSourceAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<Coordinate>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(extract_imports(&content)
            .into_iter()
            .map(Coordinate::java_import)
            .collect())
    }
}

/// Analyzer for Maven `pom.xml` descriptors.
///
/// Aggregator POMs (packaging `pom` with modules) yield no dependencies.
pub struct PomAnalyzer;

impl PomAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for PomAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<Coordinate>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let pom = PomDescriptor::parse(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if pom.is_aggregator() {
            info!(path = %path.display(), modules = pom.modules.len(), "skipping aggregator POM");
            return Ok(Vec::new());
        }

        Ok(pom
            .dependencies
            .into_iter()
            .map(|dep| {
                let version = MavenVersion::from_declared(dep.version.as_deref());
                Coordinate::maven(dep.group_id, dep.artifact_id, version)
            })
            .collect())
    }
}

/// Unique, sorted import paths from Java source, JDK packages excluded.
fn extract_imports(source: &str) -> Vec<String> {
    let mut imports = BTreeSet::new();

    for line in source.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix("import ") else {
            continue;
        };
        let Some(target) = rest.strip_suffix(';') else {
            continue;
        };
        let target = target.trim();
        let target = target.strip_prefix("static ").unwrap_or(target).trim();

        if JDK_PREFIXES.iter().any(|p| target.starts_with(p)) {
            debug!(import = target, "skipping JDK import");
            continue;
        }

        if target.contains('.') {
            imports.insert(target.to_string());
        }
    }

    imports.into_iter().collect()
}
