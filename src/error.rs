use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single registry lookup.
///
/// These never abort a batch: the resolver turns them into an `"Unknown"`
/// record that carries the error text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The registry answered with a non-success status code.
    #[error("HTTP {0}")]
    Status(u16),
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The response body was not the JSON/XML shape we expected.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Parse(err.to_string())
    }
}

impl From<quick_xml::Error> for LookupError {
    fn from(err: quick_xml::Error) -> Self {
        LookupError::Parse(err.to_string())
    }
}

/// Problems with what the user handed us. Reported before any registry call.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported file type: {}", .0.display())]
    Unsupported(PathBuf),
    #[error("Gradle build files are not supported yet: {}", .0.display())]
    GradleUnsupported(PathBuf),
    #[error("a Libraries.io API key is required for Python packages (set LIBRARIES_IO_API_KEY or pass --api-key)")]
    MissingApiKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_renders_like_http_code() {
        assert_eq!(LookupError::Status(404).to_string(), "HTTP 404");
    }

    #[test]
    fn test_json_error_is_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(LookupError::from(err), LookupError::Parse(_)));
    }
}
