//! Running the scan over every tracked project.

use std::time::Duration;

use tracing::{info, warn};

use crate::data::{Match, Project, ProjectFailure, RunOutcome};
use crate::error::ReconError;
use crate::git::CheckoutStore;
use crate::recon::scan::{scan_project, ScanWindow};

/// Parameters shared by every project of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Size of the scan window in seconds.
    pub time_range: i64,
    /// Maximum number of commits examined per project.
    pub max_commits: usize,
    /// Keywords in configured order, any case.
    pub keywords: Vec<String>,
    /// Optional wall-clock budget per project.
    pub budget: Option<Duration>,
}

impl ScanSettings {
    /// Window applied to each project.
    pub fn window(&self) -> ScanWindow {
        ScanWindow {
            time_range: self.time_range,
            max_commits: self.max_commits,
            budget: self.budget,
        }
    }
}

/// Lower-cases keywords, keeping their order.
pub fn normalize_keywords(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.to_lowercase()).collect()
}

/// Scans `projects` in order and concatenates their matches.
///
/// A project that fails is recorded in [`RunOutcome::failures`] and the run
/// moves on to the next one.
pub fn run(store: &CheckoutStore, settings: &ScanSettings, projects: &[Project]) -> RunOutcome {
    let keywords = normalize_keywords(&settings.keywords);
    let window = settings.window();

    collect_outcome(projects, |project| {
        scan_project(store, project, &window, &keywords)
    })
}

pub(crate) fn collect_outcome<F>(projects: &[Project], mut scan: F) -> RunOutcome
where
    F: FnMut(&Project) -> Result<Vec<Match>, ReconError>,
{
    let mut outcome = RunOutcome::default();

    for project in projects {
        info!(project = %project.name, branch = %project.branch, "Processing project");
        match scan(project) {
            Ok(matches) => outcome.matches.extend(matches),
            Err(e) => {
                let error = e.chain_message();
                warn!(project = %project.name, "Skipping project: {error}");
                outcome.failures.push(ProjectFailure {
                    project: project.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        matches = outcome.matches.len(),
        failed = outcome.failures.len(),
        "Run finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> Project {
        Project::new(name, format!("file:///{name}"), "main", "https://example.com/c/")
    }

    fn found(project: &str, summary: &str) -> Match {
        Match {
            project_name: project.to_string(),
            triggered_keyword: "kw".to_string(),
            url: format!("https://example.com/c/{summary}"),
            summary: summary.to_string(),
            author: "Ada".to_string(),
            formatted_date: "Fri, 01 Jan 2021".to_string(),
            full_message: summary.to_string(),
        }
    }

    #[test]
    fn keywords_are_lower_cased_in_order() {
        let keywords = vec!["OpenSSL".to_string(), "cve".to_string(), "LibSSH".to_string()];
        assert_eq!(normalize_keywords(&keywords), vec!["openssl", "cve", "libssh"]);
    }

    #[test]
    fn matches_follow_project_order() {
        let projects = vec![project("a"), project("b")];
        let outcome = collect_outcome(&projects, |p| {
            Ok(match p.name.as_str() {
                "a" => vec![found("a", "a1"), found("a", "a2")],
                _ => vec![found("b", "b1")],
            })
        });

        let summaries: Vec<&str> = outcome.matches.iter().map(|m| m.summary.as_str()).collect();
        assert_eq!(summaries, vec!["a1", "a2", "b1"]);
        assert!(outcome.is_complete());
    }

    #[test]
    fn failed_project_is_recorded_and_skipped() {
        let projects = vec![project("a"), project("b"), project("c")];
        let outcome = collect_outcome(&projects, |p| match p.name.as_str() {
            "b" => Err(ReconError::CheckoutSync {
                project: "b".to_string(),
                path: "data/b".into(),
                source: git2::Error::from_str("could not resolve host"),
            }),
            name => Ok(vec![found(name, &format!("{name}1"))]),
        });

        let summaries: Vec<&str> = outcome.matches.iter().map(|m| m.summary.as_str()).collect();
        assert_eq!(summaries, vec!["a1", "c1"]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].project, "b");
        assert!(outcome.failures[0].error.contains("could not resolve host"));
    }

    #[test]
    fn window_copies_settings() {
        let settings = ScanSettings {
            time_range: 3600,
            max_commits: 20,
            keywords: vec!["x".to_string()],
            budget: Some(Duration::from_secs(5)),
        };
        assert_eq!(
            settings.window(),
            ScanWindow {
                time_range: 3600,
                max_commits: 20,
                budget: Some(Duration::from_secs(5)),
            }
        );
    }
}
