use std::path::Path;

use anyhow::{Context, Result};

use crate::models::LicenseRecord;

pub fn to_json(records: &[LicenseRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write the JSON report to `path`.
pub fn write(records: &[LicenseRecord], path: &Path) -> Result<()> {
    std::fs::write(path, to_json(records)?)
        .with_context(|| format!("failed to write report to {}", path.display()))
}
