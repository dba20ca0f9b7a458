//! Decides whether a single commit is relevant to the tracked keywords.

use crate::data::Project;

/// Read access to the parts of a commit the classifier looks at.
pub trait CandidateCommit {
    /// Raw commit message, exactly as recorded.
    fn message(&self) -> &str;

    /// One patch text per changed file, diffed against the first parent (or
    /// the empty tree for a root commit), in traversal order.
    ///
    /// Entries that cannot be produced are left out.
    fn diff_entries(&self) -> Vec<String>;
}

/// Returns the keyword that makes `commit` relevant, if any.
///
/// `keywords` must already be lower-case. Diff entries are scanned in order
/// and, for each entry, keywords in configured order; the first hit wins. A
/// keyword that is part of the project's own name never matches. Diff text is
/// compared case-insensitively while the message is compared verbatim, so an
/// upper-case mention that only appears in the message is not a hit.
///
/// A commit without diff entries is never relevant, whatever its message says.
pub fn classify<C>(project: &Project, commit: &C, keywords: &[String]) -> Option<String>
where
    C: CandidateCommit + ?Sized,
{
    let project_name = project.name.to_lowercase();
    let message = commit.message();

    for entry in commit.diff_entries() {
        let entry = entry.to_lowercase();
        for keyword in keywords {
            if project_name.contains(keyword.as_str()) {
                continue;
            }
            if entry.contains(keyword.as_str()) || message.contains(keyword.as_str()) {
                return Some(keyword.clone());
            }
        }
    }

    None
}
