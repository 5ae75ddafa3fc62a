use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::models::Coordinate;

/// Analyzer for Python source files.
///
/// Collects the top-level package of every `import` / `from ... import`
/// statement, including indented ones. Relative imports are skipped.
pub struct PythonSourceAnalyzer;

impl PythonSourceAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for PythonSourceAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<Coordinate>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(extract_imports(&content)?
            .into_iter()
            .map(Coordinate::python)
            .collect())
    }
}

/// Analyzer for `requirements.txt`-style files.
pub struct RequirementsAnalyzer;

impl RequirementsAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl super::Analyzer for RequirementsAnalyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<Coordinate>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(parse_requirements(&content)?
            .into_iter()
            .map(Coordinate::python)
            .collect())
    }
}

/// Unique, sorted top-level module names imported by `source`.
fn extract_imports(source: &str) -> Result<Vec<String>> {
    let re_import = Regex::new(r"^\s*import\s+(.+)$")?;
    let re_from = Regex::new(r"^\s*from\s+([A-Za-z_][\w\.]*)\s+import\b")?;

    let mut imports = BTreeSet::new();

    for line in source.lines() {
        let line = line.split('#').next().unwrap_or_default();

        if let Some(caps) = re_from.captures(line) {
            if let Some(top) = top_level(&caps[1]) {
                imports.insert(top);
            }
        } else if let Some(caps) = re_import.captures(line) {
            // import a.b as c, d
            for item in caps[1].trim_end_matches(';').split(',') {
                let module = item.split_whitespace().next().unwrap_or_default();
                if let Some(top) = top_level(module) {
                    imports.insert(top);
                }
            }
        }
    }

    Ok(imports.into_iter().collect())
}

fn top_level(module: &str) -> Option<String> {
    let top = module.split('.').next()?.trim();
    let valid = !top.is_empty()
        && top
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_')
        && !top.starts_with(|c: char| c.is_ascii_digit());
    valid.then(|| top.to_string())
}

/// Package names from a requirements file, without version specifiers,
/// extras or environment markers.
fn parse_requirements(content: &str) -> Result<Vec<String>> {
    let re = Regex::new(r"^([A-Za-z0-9][A-Za-z0-9_\-\.]*)")?;
    let mut packages = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        if let Some(caps) = re.captures(line) {
            packages.push(caps[1].to_string());
        }
    }

    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_extract_imports() {
        let source = r#"
import os
import sys, math  # stdlib
import numpy as np
import matplotlib.pyplot as plt
from sklearn.model_selection import train_test_split
from . import sibling
from .pkg import thing

def f():
    import requests
    try:
        import PIL
    except ImportError:
        pass
"#;
        let imports = extract_imports(source).unwrap();
        assert_eq!(
            imports,
            vec!["PIL", "math", "matplotlib", "numpy", "os", "requests", "sklearn", "sys"]
        );
    }

    #[test]
    fn test_comment_lines_are_ignored() {
        let imports = extract_imports("# import secret\nimport rich\n").unwrap();
        assert_eq!(imports, vec!["rich"]);
    }

    #[test]
    fn test_parse_requirements() {
        let content = "\
# comment
requests==2.28.1
flask>=2.0.0
numpy==1.24.0 ; python_version >= '3.8'
uvicorn[standard]~=0.23
-r other.txt

Django
";
        assert_eq!(
            parse_requirements(content).unwrap(),
            vec!["requests", "flask", "numpy", "uvicorn", "Django"]
        );
    }

    #[test]
    fn test_source_analyzer_reads_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "import requests\nfrom dateutil import parser").unwrap();

        let coords = PythonSourceAnalyzer::new().analyze(f.path()).unwrap();
        assert_eq!(
            coords,
            vec![Coordinate::python("dateutil"), Coordinate::python("requests")]
        );
    }
}
