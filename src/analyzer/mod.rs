use std::path::Path;

use anyhow::Result;

use crate::models::Coordinate;

pub mod java;
pub mod python;

/// Extracts the external libraries referenced by one input file.
pub trait Analyzer {
    fn analyze(&self, path: &Path) -> Result<Vec<Coordinate>>;
}
