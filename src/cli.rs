//! CLI interface for git-recon.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::{ReconConfig, DEFAULT_CONFIG_FILE};

pub mod config;
pub mod run;
pub mod scan;

/// git-recon: watches repositories for commits that mention tracked keywords.
#[derive(Parser)]
#[command(name = "git-recon")]
#[command(about = "Finds recent commits that mention tracked keywords", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Logs progress at info level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main command categories.
#[derive(Subcommand)]
pub enum Commands {
    /// Scans every project and writes the HTML report.
    Run(run::RunCommand),
    /// Scans projects and prints the matches without writing a report.
    Scan(scan::ScanCommand),
    /// Configuration inspection.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run(run_cmd) => run_cmd.execute(),
            Commands::Scan(scan_cmd) => scan_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}

/// Options locating the configuration, shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Path to the configuration file.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the project checkouts (overrides `dataDir`).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Loads the configuration and applies command-line overrides.
    pub fn load(&self) -> Result<ReconConfig> {
        let mut config = ReconConfig::load(&self.config)?;
        if let Some(data_dir) = &self.data_dir {
            config.data_dir.clone_from(data_dir);
        }
        Ok(config)
    }
}
