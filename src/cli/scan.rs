//! Scan command — prints matches as YAML or JSON instead of rendering a page.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::cli::ConfigArgs;
use crate::data::RunOutcome;
use crate::git::CheckoutStore;
use crate::recon;

/// Structured output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// YAML with multi-line commit messages as literal blocks.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Scan command options.
#[derive(Parser)]
pub struct ScanCommand {
    /// Configuration location.
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Only scans the named project (repeatable). Defaults to all projects.
    #[arg(short, long = "project", value_name = "NAME")]
    pub projects: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

impl ScanCommand {
    /// Executes the scan command.
    pub fn execute(self) -> Result<()> {
        let config = self.config.load()?;
        let projects = config.select_projects(&self.projects)?;

        let store = CheckoutStore::new(&config.data_dir);
        let outcome = recon::run(&store, &config.scan_settings(), &projects);

        println!("{}", format_outcome(&outcome, self.format)?);
        Ok(())
    }
}

/// Serializes a run outcome in the requested format.
pub fn format_outcome(outcome: &RunOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => crate::data::to_yaml(outcome),
        OutputFormat::Json => {
            serde_json::to_string_pretty(outcome).context("Failed to serialize outcome to JSON")
        }
    }
}
