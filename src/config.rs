//! Loading and validation of `config.toml`.
//!
//! The file keeps the camelCase keys used by existing git-recon setups:
//!
//! ```toml
//! timeRange = 604800
//! maxCommits = 500
//! keywords = ["OpenSSL", "CVE"]
//!
//! [projects.curl]
//! url = "https://github.com/curl/curl"
//! branch = "master"
//! commitUrlPrefix = "https://github.com/curl/curl/commit/"
//! ```
//!
//! Projects are scanned in the order their tables appear in the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::Project;
use crate::error::ReconError;
use crate::recon::ScanSettings;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Default checkout root, relative to the config file.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default report path, relative to the config file.
pub const DEFAULT_OUT_FILE: &str = "docs/index.html";

/// On-disk shape of the config file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    time_range: i64,
    max_commits: i64,
    keywords: Vec<String>,
    #[serde(default)]
    projects: toml::Table,
    #[serde(default)]
    data_dir: Option<PathBuf>,
    #[serde(default)]
    out_file: Option<PathBuf>,
    #[serde(default)]
    scan_budget_seconds: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    url: String,
    branch: String,
    commit_url_prefix: String,
}

/// Validated configuration for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconConfig {
    /// Size of the scan window in seconds, counted back from now.
    pub time_range: i64,
    /// Maximum number of commits examined per project.
    pub max_commits: usize,
    /// Keywords as written in the file.
    pub keywords: Vec<String>,
    /// Tracked projects in file order.
    pub projects: Vec<Project>,
    /// Root directory holding one checkout per project.
    pub data_dir: PathBuf,
    /// Path of the rendered report.
    pub out_file: PathBuf,
    /// Optional wall-clock budget per project scan, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_budget_seconds: Option<u64>,
}

impl ReconConfig {
    /// Loads and validates a config file. Relative paths inside it resolve
    /// against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml_str(&content, base_dir)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parses and validates config content.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ReconError> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ReconError::Config(format!("Invalid TOML: {e}")))?;

        if raw.time_range <= 0 {
            return Err(ReconError::Config(format!(
                "timeRange must be a positive number of seconds, got {}",
                raw.time_range
            )));
        }
        if raw.max_commits <= 0 {
            return Err(ReconError::Config(format!(
                "maxCommits must be positive, got {}",
                raw.max_commits
            )));
        }
        if raw.keywords.is_empty() {
            return Err(ReconError::Config(
                "keywords must contain at least one entry".to_string(),
            ));
        }
        if let Some(index) = raw.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(ReconError::Config(format!(
                "keyword at index {index} is blank"
            )));
        }
        if raw.scan_budget_seconds == Some(0) {
            return Err(ReconError::Config(
                "scanBudgetSeconds must be positive when set".to_string(),
            ));
        }

        let mut projects = Vec::with_capacity(raw.projects.len());
        for (name, value) in raw.projects {
            validate_project_name(&name)?;
            let entry: RawProject = value
                .try_into()
                .map_err(|e| ReconError::Config(format!("project '{name}': {e}")))?;
            if entry.url.trim().is_empty() {
                return Err(ReconError::Config(format!("project '{name}': url is empty")));
            }
            if entry.branch.trim().is_empty() {
                return Err(ReconError::Config(format!(
                    "project '{name}': branch is empty"
                )));
            }
            projects.push(Project::new(
                name,
                entry.url,
                entry.branch,
                entry.commit_url_prefix,
            ));
        }

        if projects.is_empty() {
            warn!("Configuration does not track any projects");
        }

        Ok(Self {
            time_range: raw.time_range,
            max_commits: raw.max_commits as usize,
            keywords: raw.keywords,
            projects,
            data_dir: base_dir.join(raw.data_dir.unwrap_or_else(|| DEFAULT_DATA_DIR.into())),
            out_file: base_dir.join(raw.out_file.unwrap_or_else(|| DEFAULT_OUT_FILE.into())),
            scan_budget_seconds: raw.scan_budget_seconds,
        })
    }

    /// Returns the scan parameters shared by every project.
    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings {
            time_range: self.time_range,
            max_commits: self.max_commits,
            keywords: self.keywords.clone(),
            budget: self.scan_budget_seconds.map(Duration::from_secs),
        }
    }

    /// Returns the named projects in config order, or every project when
    /// `names` is empty.
    pub fn select_projects(&self, names: &[String]) -> Result<Vec<Project>, ReconError> {
        if names.is_empty() {
            return Ok(self.projects.clone());
        }

        if let Some(unknown) = names
            .iter()
            .find(|name| !self.projects.iter().any(|p| &p.name == *name))
        {
            return Err(ReconError::Config(format!("unknown project '{unknown}'")));
        }

        Ok(self
            .projects
            .iter()
            .filter(|p| names.contains(&p.name))
            .cloned()
            .collect())
    }
}

/// Project names become checkout directory names under the data dir.
fn validate_project_name(name: &str) -> Result<(), ReconError> {
    if name.trim().is_empty() {
        return Err(ReconError::Config("project name is empty".to_string()));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ReconError::Config(format!(
            "project name '{name}' cannot be used as a directory name"
        )));
    }
    Ok(())
}
