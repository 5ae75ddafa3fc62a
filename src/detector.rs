use std::path::Path;

use crate::error::InputError;

/// Kind of input file, which decides how dependencies are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    PythonSource,
    Requirements,
    JavaSource,
    MavenDescriptor,
}

impl SourceKind {
    /// Pick the source kind from the file name and extension.
    pub fn detect(path: &Path) -> Result<SourceKind, InputError> {
        if !path.is_file() {
            return Err(InputError::NotFound(path.to_path_buf()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "py" => Ok(SourceKind::PythonSource),
            "java" => Ok(SourceKind::JavaSource),
            "xml" if file_name.contains("pom") => Ok(SourceKind::MavenDescriptor),
            "txt" if file_name.starts_with("requirements") => Ok(SourceKind::Requirements),
            "gradle" | "kts" if file_name.contains(".gradle") => {
                Err(InputError::GradleUnsupported(path.to_path_buf()))
            }
            _ => Err(InputError::Unsupported(path.to_path_buf())),
        }
    }
}
