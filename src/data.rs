//! Value types shared by the scanner, the report and the structured output.

use serde::{Deserialize, Serialize};

pub mod yaml;

pub use yaml::*;

/// A tracked repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique, case-sensitive project name. Also names the checkout directory.
    pub name: String,
    /// Clone URL (or local path) of the repository.
    pub source_url: String,
    /// Branch whose history is scanned.
    pub branch: String,
    /// Prefix that a hex commit hash is appended to for a browsable link.
    pub commit_url_template: String,
}

impl Project {
    /// Creates a project description.
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        branch: impl Into<String>,
        commit_url_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            branch: branch.into(),
            commit_url_template: commit_url_template.into(),
        }
    }

    /// Builds the browsable URL of a commit.
    pub fn commit_url(&self, hex_hash: &str) -> String {
        format!("{}{hex_hash}", self.commit_url_template)
    }
}

/// A commit accepted by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Name of the project the commit belongs to.
    pub project_name: String,
    /// Keyword that caused the commit to be reported.
    pub triggered_keyword: String,
    /// Link to the commit.
    pub url: String,
    /// First line of the commit message.
    pub summary: String,
    /// Commit author name.
    pub author: String,
    /// Commit date, e.g. `Tue, 05 Jan 2021`.
    pub formatted_date: String,
    /// Complete commit message.
    pub full_message: String,
}

/// A project whose scan did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFailure {
    /// Name of the failed project.
    pub project: String,
    /// Error message including its cause chain.
    pub error: String,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Matches in project order, newest commit first within a project.
    pub matches: Vec<Match>,
    /// Projects that were skipped because their scan failed.
    pub failures: Vec<ProjectFailure>,
}

impl RunOutcome {
    /// Returns true if every project was scanned.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the process exit code for a finished run.
    ///
    /// A run with failed projects only exits non-zero under `strict`.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && !self.is_complete() {
            2
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_url_appends_hash() {
        let project = Project::new(
            "curl",
            "https://github.com/curl/curl",
            "master",
            "https://github.com/curl/curl/commit/",
        );
        assert_eq!(
            project.commit_url("0123abcd"),
            "https://github.com/curl/curl/commit/0123abcd"
        );
    }

    #[test]
    fn exit_code_only_fails_under_strict() {
        let outcome = RunOutcome {
            matches: Vec::new(),
            failures: vec![ProjectFailure {
                project: "b".to_string(),
                error: "boom".to_string(),
            }],
        };
        assert_eq!(outcome.exit_code(false), 0);
        assert_eq!(outcome.exit_code(true), 2);
        assert_eq!(RunOutcome::default().exit_code(true), 0);
    }
}
