use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "library-license-checkr",
    about = "Resolve and rate the licenses of a file's Python or Java dependencies",
    version
)]
pub struct Cli {
    /// Source file to check (.py, requirements*.txt, .java or pom.xml)
    pub file: PathBuf,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Write the JSON report to FILE instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file [default: ./.license-checkr/config.toml, fallback ~/.config/license-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Libraries.io API key
    #[arg(long, env = "LIBRARIES_IO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Show all dependencies (not just caution/risky)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_report_with_output() {
        let cli = Cli::try_parse_from([
            "library-license-checkr",
            "pom.xml",
            "--report",
            "json",
            "--output",
            "out.json",
            "--api-key",
            "KEY",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("pom.xml"));
        assert!(matches!(cli.report, ReportFormat::Json));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["library-license-checkr"]).is_err());
    }
}
