//! Domain errors for a recon run.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading configuration, syncing checkouts, scanning
/// history or writing the report.
#[derive(Error, Debug)]
pub enum ReconError {
    /// The configuration file is missing a field or holds an invalid value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Cloning or updating a project's checkout failed.
    #[error("Failed to sync checkout of '{project}' at {path}")]
    CheckoutSync {
        /// Name of the project whose checkout could not be synced.
        project: String,
        /// Directory the checkout lives in.
        path: PathBuf,
        /// Underlying git failure.
        #[source]
        source: git2::Error,
    },

    /// Walking the history of a synced checkout failed.
    #[error("Failed to read history of '{project}' on branch '{branch}'")]
    History {
        /// Name of the project being scanned.
        project: String,
        /// Branch whose tip the walk started from.
        branch: String,
        /// Underlying git failure.
        #[source]
        source: git2::Error,
    },

    /// A project scan ran longer than its configured wall-clock budget.
    #[error("Scan of '{project}' exceeded its budget of {}s", .budget.as_secs())]
    ScanBudgetExceeded {
        /// Name of the project being scanned.
        project: String,
        /// Configured budget.
        budget: Duration,
    },

    /// The report document could not be written.
    #[error("Failed to write report to {path}")]
    Render {
        /// Target path of the report.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ReconError {
    /// Returns the error message followed by every source in its chain.
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(&format!(": {err}"));
            source = err.source();
        }
        message
    }
}
