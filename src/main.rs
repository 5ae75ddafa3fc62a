//! `library-license-checkr` — resolve the licenses of a file's dependencies and rate them.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and start logging.
//! 2. Load settings ([`config::load_settings`]) and build the [`catalog::Catalog`].
//! 3. Detect the input kind ([`detector::SourceKind::detect`]).
//! 4. Extract dependency coordinates ([`analyzer`]).
//! 5. Resolve licenses against the registries ([`resolver`], [`registry`]).
//! 6. Deduplicate ([`dedupe`]) and render the report ([`report`]).

mod analyzer;
mod catalog;
mod cli;
mod config;
mod dedupe;
mod detector;
mod error;
mod license;
mod models;
mod pom;
mod registry;
mod report;
mod resolver;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use analyzer::Analyzer;
use catalog::Catalog;
use cli::{Cli, ReportFormat};
use config::load_settings;
use detector::SourceKind;
use registry::ReqwestFetcher;
use resolver::Resolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let settings = load_settings(cli.config.as_deref(), cli.api_key.clone())?;
    let catalog = Arc::new(Catalog::from_settings(&settings));

    let kind = SourceKind::detect(&cli.file)?;
    info!(file = %cli.file.display(), ?kind, "detected source kind");

    let coordinates = match kind {
        SourceKind::PythonSource => {
            analyzer::python::PythonSourceAnalyzer::new().analyze(&cli.file)?
        }
        SourceKind::Requirements => analyzer::python::RequirementsAnalyzer::new().analyze(&cli.file)?,
        SourceKind::JavaSource => analyzer::java::JavaSourceAnalyzer::new().analyze(&cli.file)?,
        SourceKind::MavenDescriptor => analyzer::java::PomAnalyzer::new().analyze(&cli.file)?,
    };

    if coordinates.is_empty() {
        println!("No packages or dependencies found");
        return Ok(());
    }

    if !cli.quiet {
        eprintln!(
            "  {} {} dependencies in {}",
            "→".cyan(),
            coordinates.len(),
            cli.file.display()
        );
    }

    let fetcher = Arc::new(ReqwestFetcher::new(&settings.registry)?);
    let resolver = Resolver::new(fetcher, &settings, catalog);
    resolver.ensure_credentials(&coordinates)?;

    let records = resolver.resolve_all(&coordinates, !cli.quiet).await;
    let records = dedupe::dedupe(records);

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&records, &cli.file, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => match &cli.output {
            Some(path) => report::json::write(&records, path)?,
            None => println!("{}", report::json::to_json(&records)?),
        },
    }

    Ok(())
}
