//! Configuration-related CLI commands.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cli::ConfigArgs;
use crate::recon::normalize_keywords;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Validates the configuration and prints it as YAML, with keywords
    /// lower-cased and paths resolved.
    Show(ShowCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Configuration location.
    #[command(flatten)]
    pub config: ConfigArgs,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let mut config = self.config.load()?;
        config.keywords = normalize_keywords(&config.keywords);

        println!("{}", crate::data::to_yaml(&config)?);
        Ok(())
    }
}
