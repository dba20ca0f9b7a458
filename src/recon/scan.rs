//! Scanning one project's recent history.

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, TimeZone, Utc};
use git2::Repository;
use tracing::{debug, info};

use crate::data::{Match, Project};
use crate::error::ReconError;
use crate::git::{recent_commits, CheckoutStore, GitCandidate};
use crate::recon::classify;

/// Format of the per-match commit date.
pub const COMMIT_DATE_FORMAT: &str = "%a, %d %b %Y";

/// Bounds of a project scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    /// Size of the window in seconds, counted back from now.
    pub time_range: i64,
    /// Maximum number of commits examined.
    pub max_commits: usize,
    /// Wall-clock budget for the whole scan.
    pub budget: Option<Duration>,
}

/// Syncs the project's checkout and returns its relevant recent commits,
/// newest first.
///
/// `keywords` must already be lower-case.
pub fn scan_project(
    store: &CheckoutStore,
    project: &Project,
    window: &ScanWindow,
    keywords: &[String],
) -> Result<Vec<Match>, ReconError> {
    let started = Instant::now();
    let repo = store.ensure(project)?;
    scan_checkout(&repo, project, window, keywords, Utc::now().timestamp(), started)
}

/// Scans an already synced checkout as of `now` (seconds since the epoch).
///
/// The budget, if any, is measured from `started` and checked before each
/// commit; running out fails the scan instead of returning partial results.
pub fn scan_checkout(
    repo: &Repository,
    project: &Project,
    window: &ScanWindow,
    keywords: &[String],
    now: i64,
    started: Instant,
) -> Result<Vec<Match>, ReconError> {
    let history_error = |source| ReconError::History {
        project: project.name.clone(),
        branch: project.branch.clone(),
        source,
    };

    let min_timestamp = now - window.time_range;
    let history = recent_commits(repo, &project.branch, window.max_commits, min_timestamp)
        .map_err(history_error)?;

    let mut matches = Vec::new();
    let mut examined = 0usize;
    for commit in history {
        if let Some(budget) = window.budget {
            if started.elapsed() >= budget {
                return Err(ReconError::ScanBudgetExceeded {
                    project: project.name.clone(),
                    budget,
                });
            }
        }

        let candidate = GitCandidate::new(repo, commit.map_err(history_error)?);
        examined += 1;

        match classify(project, &candidate, keywords) {
            Some(keyword) => {
                debug!(
                    project = %project.name,
                    commit = %candidate.short_hash(),
                    keyword = %keyword,
                    "Commit matched"
                );
                matches.push(build_match(project, &candidate, keyword));
            }
            None => {
                debug!(project = %project.name, commit = %candidate.short_hash(), "No match");
            }
        }
    }

    info!(
        project = %project.name,
        examined,
        matches = matches.len(),
        "Finished scanning project"
    );
    Ok(matches)
}

fn build_match(project: &Project, candidate: &GitCandidate<'_>, keyword: String) -> Match {
    use crate::recon::CandidateCommit;

    Match {
        project_name: project.name.clone(),
        triggered_keyword: keyword,
        url: project.commit_url(&candidate.hex_hash()),
        summary: candidate.summary().to_string(),
        author: candidate.author(),
        formatted_date: format_commit_date(candidate.committed_timestamp()),
        full_message: candidate.message().to_string(),
    }
}

/// Formats a commit timestamp in the local time zone.
pub fn format_commit_date(timestamp: i64) -> String {
    format_commit_date_in(timestamp, &Local)
}

/// Formats a commit timestamp in `tz`, falling back to UTC for timestamps
/// the zone cannot represent unambiguously.
pub fn format_commit_date_in<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match tz.timestamp_opt(timestamp, 0).single() {
        Some(date) => date.format(COMMIT_DATE_FORMAT).to_string(),
        None => DateTime::<Utc>::from_timestamp(timestamp, 0)
            .unwrap_or_default()
            .format(COMMIT_DATE_FORMAT)
            .to_string(),
    }
}
