//! Bounded, newest-first history walks.

use git2::{Commit, Repository, Sort};

/// Walks the history reachable from `branch`'s tip, newest first.
///
/// At most `max_commits` commits are examined and only those committed at or
/// after `min_timestamp` are yielded. The cap is applied to the walk before
/// the age filter: it bounds history depth, not the number of results, so
/// in-range commits that sit behind `max_commits` newer (or out-of-range)
/// commits are never reached.
pub fn recent_commits<'r>(
    repo: &'r Repository,
    branch: &str,
    max_commits: usize,
    min_timestamp: i64,
) -> Result<impl Iterator<Item = Result<Commit<'r>, git2::Error>> + 'r, git2::Error> {
    let tip = repo
        .find_reference(&format!("refs/heads/{branch}"))?
        .peel_to_commit()?;

    let mut walk = repo.revwalk()?;
    walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
    walk.push(tip.id())?;

    Ok(walk
        .take(max_commits)
        .map(move |oid| repo.find_commit(oid?))
        .filter(move |commit| match commit {
            Ok(commit) => commit.time().seconds() >= min_timestamp,
            Err(_) => true,
        }))
}
