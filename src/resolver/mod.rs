//! Resolution of dependency coordinates to license records.
//!
//! - [`python`] — Libraries.io → declared licenses → PyPI, with aliases and
//!   pinned standard-library licenses.
//! - [`java`] — Maven Central search / metadata → POM licenses → trusted
//!   override → known-good fallback version.
//!
//! Every lookup failure ends up inside the returned record; nothing here
//! aborts a batch.

pub mod java;
pub mod python;

use std::sync::Arc;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::{RegistryConfig, Settings};
use crate::error::InputError;
use crate::models::{Coordinate, LicenseRecord};
use crate::registry::HttpFetch;

pub struct Resolver {
    fetcher: Arc<dyn HttpFetch>,
    config: RegistryConfig,
    catalog: Arc<Catalog>,
    api_key: Option<String>,
}

impl Resolver {
    pub fn new(fetcher: Arc<dyn HttpFetch>, settings: &Settings, catalog: Arc<Catalog>) -> Self {
        Resolver {
            fetcher,
            config: settings.registry.clone(),
            catalog,
            api_key: settings.libraries_io_api_key().ok().map(str::to_string),
        }
    }

    /// Fail fast when Python packages need Libraries.io but no key is configured.
    pub fn ensure_credentials(&self, coordinates: &[Coordinate]) -> Result<(), InputError> {
        let needs_key = coordinates.iter().any(|c| match c {
            Coordinate::Python { name } => self
                .catalog
                .standard_lib_license(self.catalog.python_alias(name))
                .is_none(),
            _ => false,
        });

        if needs_key && self.api_key.is_none() {
            return Err(InputError::MissingApiKey);
        }
        Ok(())
    }

    pub async fn resolve(&self, coordinate: &Coordinate) -> LicenseRecord {
        debug!(ecosystem = %coordinate.ecosystem(), ?coordinate, "resolving");
        match coordinate {
            Coordinate::Python { name } => self.resolve_python(name).await,
            Coordinate::Maven {
                group,
                artifact,
                version,
            } => self.resolve_java(group, artifact, version).await,
            Coordinate::JavaImport { path } => self.resolve_java_import(path).await,
        }
    }

    /// Resolve every coordinate, `batch_size` at a time, keeping input order.
    pub async fn resolve_all(&self, coordinates: &[Coordinate], show_progress: bool) -> Vec<LicenseRecord> {
        let pb = show_progress.then(|| {
            let pb = ProgressBar::new(coordinates.len() as u64);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb
        });

        let mut records = Vec::with_capacity(coordinates.len());
        for batch in coordinates.chunks(self.config.batch_size.max(1)) {
            let results = join_all(batch.iter().map(|c| self.resolve(c))).await;
            if let Some(pb) = &pb {
                pb.inc(results.len() as u64);
            }
            records.extend(results);
        }

        if let Some(pb) = pb {
            pb.finish_with_message("Done");
        }
        records
    }
}
