//! Local checkouts of tracked projects.

use std::path::{Path, PathBuf};

use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::Repository;
use tracing::info;

use crate::data::Project;
use crate::error::ReconError;

/// Name of the remote every checkout is cloned from.
const REMOTE: &str = "origin";

/// Directory holding one checkout per project, named after the project.
#[derive(Debug, Clone)]
pub struct CheckoutStore {
    base_dir: PathBuf,
}

impl CheckoutStore {
    /// Creates a store rooted at `base_dir`. Nothing is created on disk until
    /// a checkout is requested.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory of a project's checkout.
    pub fn checkout_path(&self, project: &Project) -> PathBuf {
        self.base_dir.join(&project.name)
    }

    /// Returns a checkout of `project` whose `branch` matches the remote.
    ///
    /// Clones when no checkout exists yet; otherwise fetches the branch,
    /// moves the local branch to the fetched tip and checks it out. Local
    /// changes inside the checkout are discarded.
    pub fn ensure(&self, project: &Project) -> Result<Repository, ReconError> {
        let path = self.checkout_path(project);

        let result = if path.exists() {
            info!(
                project = %project.name,
                path = %path.display(),
                "Updating existing checkout"
            );
            update(project, &path)
        } else {
            info!(project = %project.name, url = %project.source_url, "Cloning repository");
            clone(project, &path)
        };

        result.map_err(|source| ReconError::CheckoutSync {
            project: project.name.clone(),
            path,
            source,
        })
    }
}

fn clone(project: &Project, path: &Path) -> Result<Repository, git2::Error> {
    let mut builder = RepoBuilder::new();
    builder.branch(&project.branch);
    builder.clone(&project.source_url, path)
}

fn update(project: &Project, path: &Path) -> Result<Repository, git2::Error> {
    let repo = Repository::open(path)?;

    // The URL may have changed in the config since the clone.
    repo.remote_set_url(REMOTE, &project.source_url)?;

    {
        let mut remote = repo.find_remote(REMOTE)?;
        let refspec = format!(
            "+refs/heads/{branch}:refs/remotes/{REMOTE}/{branch}",
            branch = project.branch
        );
        remote.fetch(&[refspec.as_str()], None, None)?;

        let fetched = repo
            .find_reference(&format!("refs/remotes/{REMOTE}/{}", project.branch))?
            .peel_to_commit()?;

        let local_ref = format!("refs/heads/{}", project.branch);
        repo.reference(&local_ref, fetched.id(), true, "git-recon: sync to remote")?;
        repo.set_head(&local_ref)?;
        repo.checkout_head(Some(CheckoutBuilder::new().force()))?;
    }

    Ok(repo)
}
