//! Commit accessors and per-file patch extraction.

use git2::{Commit, Diff, Oid, Patch, Repository};
use tracing::debug;

use crate::git::SHORT_HASH_LEN;
use crate::recon::CandidateCommit;

/// A commit read from a checkout, with its diff computed on demand.
pub struct GitCandidate<'r> {
    repo: &'r Repository,
    commit: Commit<'r>,
    message: String,
}

impl<'r> GitCandidate<'r> {
    /// Wraps a commit of `repo`.
    pub fn new(repo: &'r Repository, commit: Commit<'r>) -> Self {
        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        Self {
            repo,
            commit,
            message,
        }
    }

    /// Full lower-case hex hash.
    pub fn hex_hash(&self) -> String {
        self.commit.id().to_string()
    }

    /// Abbreviated hash for log output.
    pub fn short_hash(&self) -> String {
        let mut hash = self.hex_hash();
        hash.truncate(SHORT_HASH_LEN);
        hash
    }

    /// Parent ids in recorded order.
    pub fn parent_ids(&self) -> Vec<Oid> {
        self.commit.parent_ids().collect()
    }

    /// Author name.
    pub fn author(&self) -> String {
        String::from_utf8_lossy(self.commit.author().name_bytes()).into_owned()
    }

    /// Committer timestamp in seconds since the epoch.
    pub fn committed_timestamp(&self) -> i64 {
        self.commit.time().seconds()
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Diff of this commit against its first parent, or against the empty
    /// tree for a root commit.
    fn reference_diff(&self) -> Result<Diff<'r>, git2::Error> {
        let commit_tree = self.commit.tree()?;
        let parent_tree = if self.commit.parent_count() > 0 {
            Some(self.commit.parent(0)?.tree()?)
        } else {
            None
        };

        self.repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)
    }
}

impl CandidateCommit for GitCandidate<'_> {
    fn message(&self) -> &str {
        &self.message
    }

    fn diff_entries(&self) -> Vec<String> {
        let diff = match self.reference_diff() {
            Ok(diff) => diff,
            Err(e) => {
                debug!(commit = %self.short_hash(), "Skipping diff of commit: {e}");
                return Vec::new();
            }
        };

        let mut entries = Vec::with_capacity(diff.deltas().len());
        for idx in 0..diff.deltas().len() {
            let patch_text = Patch::from_diff(&diff, idx)
                .and_then(|patch| patch.map(|mut p| p.to_buf()).transpose());

            match patch_text {
                Ok(Some(buf)) => entries.push(String::from_utf8_lossy(&buf).into_owned()),
                Ok(None) => {}
                Err(e) => {
                    debug!(
                        commit = %self.short_hash(),
                        delta = idx,
                        "Skipping unreadable diff entry: {e}"
                    );
                }
            }
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Signature, Time};
    use std::fs;
    use std::path::Path;

    fn commit_file(repo: &Repository, file: &str, content: &str, message: &str) -> Oid {
        let workdir = repo.workdir().unwrap().to_path_buf();
        fs::write(workdir.join(file), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let signature =
            Signature::new("Ada Lovelace", "ada@example.com", &Time::new(1_600_000_000, 0))
                .unwrap();
        let parent = repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .map(|oid| repo.find_commit(oid).unwrap());
        let parents: Vec<&Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn root_commit_diffs_against_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let oid = commit_file(&repo, "README", "hello world\n", "Initial import\n\nBody");

        let candidate = GitCandidate::new(&repo, repo.find_commit(oid).unwrap());
        let entries = candidate.diff_entries();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("+hello world"));
        assert!(candidate.parent_ids().is_empty());
        assert_eq!(candidate.summary(), "Initial import");
        assert_eq!(candidate.message(), "Initial import\n\nBody");
        assert_eq!(candidate.author(), "Ada Lovelace");
        assert_eq!(candidate.committed_timestamp(), 1_600_000_000);
        assert_eq!(candidate.short_hash().len(), SHORT_HASH_LEN);
    }

    #[test]
    fn child_commit_only_carries_its_own_change() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit_file(&repo, "a.txt", "first\n", "one");
        commit_file(&repo, "b.txt", "second\n", "two");
        let oid = commit_file(&repo, "a.txt", "first\nthird\n", "three");

        let candidate = GitCandidate::new(&repo, repo.find_commit(oid).unwrap());
        let entries = candidate.diff_entries();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("a.txt"));
        assert!(entries[0].contains("+third"));
        assert!(!entries[0].contains("second"));
        assert_eq!(candidate.parent_ids().len(), 1);
    }

    /// Commits `tree_files` on top of `base`'s tree without touching HEAD.
    fn commit_tree(
        repo: &Repository,
        base: Oid,
        tree_files: &[(&str, &str)],
        message: &str,
        parents: &[Oid],
    ) -> Oid {
        let base_tree = repo.find_commit(base).unwrap().tree().unwrap();
        let mut builder = repo.treebuilder(Some(&base_tree)).unwrap();
        for (name, content) in tree_files {
            let blob = repo.blob(content.as_bytes()).unwrap();
            builder.insert(*name, blob, 0o100644).unwrap();
        }
        let tree = repo.find_tree(builder.write().unwrap()).unwrap();

        let signature =
            Signature::new("Ada Lovelace", "ada@example.com", &Time::new(1_600_000_000, 0))
                .unwrap();
        let parents: Vec<Commit> = parents
            .iter()
            .map(|oid| repo.find_commit(*oid).unwrap())
            .collect();
        let parents: Vec<&Commit> = parents.iter().collect();

        repo.commit(None, &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn merge_commit_diffs_against_first_parent() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let base = commit_file(&repo, "base.txt", "base\n", "base");
        let main = commit_file(&repo, "main.txt", "mainonly\n", "main change");
        let side = commit_tree(&repo, base, &[("side.txt", "sideonly\n")], "side change", &[base]);
        let merge = commit_tree(
            &repo,
            main,
            &[("side.txt", "sideonly\n")],
            "Merge branch 'side'",
            &[main, side],
        );

        let candidate = GitCandidate::new(&repo, repo.find_commit(merge).unwrap());
        let entries = candidate.diff_entries();

        assert_eq!(candidate.parent_ids(), vec![main, side]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("side.txt"));
        assert!(entries[0].contains("+sideonly"));
        assert!(entries.iter().all(|entry| !entry.contains("mainonly")));
    }
}
