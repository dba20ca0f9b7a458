//! # git-recon
//!
//! Watches a set of git repositories for recent commits whose changes
//! mention any tracked keyword, and renders the hits into a static HTML page.
//!
//! A run syncs one local checkout per project, walks at most `maxCommits`
//! commits of the configured branch newest-first, keeps those inside the
//! time window, and reports every commit whose per-file patches (or message)
//! contain a keyword.
//!
//! ## Quick Start
//!
//! ```no_run
//! use git_recon::config::ReconConfig;
//! use git_recon::git::CheckoutStore;
//!
//! let config = ReconConfig::load("config.toml")?;
//! let store = CheckoutStore::new(&config.data_dir);
//! let outcome = git_recon::recon::run(&store, &config.scan_settings(), &config.projects);
//! git_recon::report::write_report(&config.out_file, &outcome.matches, chrono::Utc::now())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod git;
pub mod recon;
pub mod report;

pub use crate::cli::Cli;
pub use crate::error::ReconError;

/// The current version of git-recon.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
