use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::InputError;

/// Root configuration structure, deserialized from `.license-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub python: PythonTables,
    #[serde(default)]
    pub java: JavaTables,
}

/// Registry endpoints and HTTP behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Libraries.io API base; the platform and package are appended.
    pub libraries_io_url: String,
    pub libraries_io_api_key: Option<String>,
    /// PyPI JSON API base (`<base>/<package>/json`).
    pub pypi_url: String,
    /// Maven Central search endpoint (solr `select`).
    pub maven_search_url: String,
    /// Maven repository root holding POMs and `maven-metadata.xml`.
    pub maven_repo_url: String,
    pub timeout_secs: u64,
    /// How many coordinates are resolved concurrently.
    pub batch_size: usize,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            libraries_io_url: "https://libraries.io/api".to_string(),
            libraries_io_api_key: None,
            pypi_url: "https://pypi.org/pypi".to_string(),
            maven_search_url: "https://search.maven.org/solrsearch/select".to_string(),
            maven_repo_url: "https://repo1.maven.org/maven2".to_string(),
            timeout_secs: 10,
            batch_size: 25,
            user_agent: format!(
                "library-license-checkr/{} (license compliance tool)",
                env!("CARGO_PKG_VERSION")
            ),
        }
    }
}

/// Extra Python entries merged over the built-in tables.
#[derive(Debug, Default, Deserialize)]
pub struct PythonTables {
    /// Import name → PyPI project name (e.g. `sklearn = "scikit-learn"`).
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// Module name → pinned license, skipping registry lookups.
    #[serde(default)]
    pub standard_libs: HashMap<String, String>,
}

/// Extra Java entries merged over the built-in tables.
#[derive(Debug, Default, Deserialize)]
pub struct JavaTables {
    /// Import prefix → `"group:artifact"`.
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    /// `"group:artifact"` → version to retry when the first lookup finds nothing.
    #[serde(default)]
    pub known_good_versions: HashMap<String, String>,
    /// `"group:artifact"` → license used when the descriptor lists none.
    #[serde(default)]
    pub trusted_licenses: HashMap<String, String>,
}

impl Settings {
    /// The Libraries.io key, or the boundary error that stops Python resolution.
    pub fn libraries_io_api_key(&self) -> Result<&str, InputError> {
        self.registry
            .libraries_io_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(InputError::MissingApiKey)
    }
}

/// Load settings, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.license-checkr/config.toml`
/// 3. `~/.config/license-checkr/config.toml`
/// 4. Built-in [`Settings::default`]
///
/// `api_key` (from `--api-key` / `LIBRARIES_IO_API_KEY`) wins over any key in the file.
pub fn load_settings(config_override: Option<&Path>, api_key: Option<String>) -> Result<Settings> {
    let mut settings = match find_config(config_override) {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_settings(&content)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Settings::default(),
    };

    if let Some(key) = api_key {
        settings.registry.libraries_io_api_key = Some(key);
    }
    Ok(settings)
}

fn find_config(config_override: Option<&Path>) -> Option<std::path::PathBuf> {
    if let Some(path) = config_override {
        return Some(path.to_path_buf());
    }

    let local = Path::new(".license-checkr").join("config.toml");
    if local.exists() {
        return Some(local);
    }

    let home_config = dirs::home_dir()?
        .join(".config")
        .join("license-checkr")
        .join("config.toml");
    home_config.exists().then_some(home_config)
}

fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.registry.pypi_url, "https://pypi.org/pypi");
        assert_eq!(settings.registry.batch_size, 25);
        assert!(settings.python.aliases.is_empty());
    }

    #[test]
    fn test_partial_registry_section_keeps_other_defaults() {
        let settings = parse_settings(
            r#"
[registry]
timeout_secs = 3
libraries_io_api_key = "secret"
"#,
        )
        .unwrap();
        assert_eq!(settings.registry.timeout_secs, 3);
        assert_eq!(settings.registry.maven_repo_url, "https://repo1.maven.org/maven2");
        assert_eq!(settings.libraries_io_api_key().unwrap(), "secret");
    }

    #[test]
    fn test_tables_are_read() {
        let settings = parse_settings(
            r#"
[python.aliases]
yaml = "PyYAML"

[java.aliases]
"com.acme" = "com.acme:acme-core"

[java.trusted_licenses]
"com.acme:acme-core" = "MIT"
"#,
        )
        .unwrap();
        assert_eq!(settings.python.aliases["yaml"], "PyYAML");
        assert_eq!(settings.java.aliases["com.acme"], "com.acme:acme-core");
        assert_eq!(settings.java.trusted_licenses["com.acme:acme-core"], "MIT");
    }

    #[test]
    fn test_missing_key_is_an_input_error() {
        let settings = Settings::default();
        assert!(matches!(
            settings.libraries_io_api_key(),
            Err(InputError::MissingApiKey)
        ));
    }

    #[test]
    fn test_cli_key_overrides_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "[registry]\nlibraries_io_api_key = \"from-file\"").unwrap();
        let settings = load_settings(Some(f.path()), Some("from-cli".to_string())).unwrap();
        assert_eq!(settings.libraries_io_api_key().unwrap(), "from-cli");
    }

    #[test]
    fn test_unreadable_override_is_an_error() {
        assert!(load_settings(Some(Path::new("/nonexistent/config.toml")), None).is_err());
    }
}
