//! Run command — scans every project and writes the HTML report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use crate::cli::ConfigArgs;
use crate::git::CheckoutStore;
use crate::recon;
use crate::report;

/// Run command options.
#[derive(Parser)]
pub struct RunCommand {
    /// Configuration location.
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Report path (overrides `outFile`).
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Exits with code 2 if any project could not be scanned.
    #[arg(long)]
    pub strict: bool,
}

impl RunCommand {
    /// Executes the run command.
    pub fn execute(self) -> Result<()> {
        let config = self.config.load()?;
        let out_file = self.out.unwrap_or_else(|| config.out_file.clone());

        let store = CheckoutStore::new(&config.data_dir);
        let outcome = recon::run(&store, &config.scan_settings(), &config.projects);

        report::write_report(&out_file, &outcome.matches, Utc::now())
            .context("Matches were found but the report could not be published")?;

        println!(
            "Found {} keyword matches across {} projects; report written to {}",
            outcome.matches.len(),
            config.projects.len() - outcome.failures.len(),
            out_file.display()
        );
        for failure in &outcome.failures {
            println!("  Failed: {}: {}", failure.project, failure.error);
        }

        let exit_code = outcome.exit_code(self.strict);
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }
}
