//! In-memory repository state for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::context::RepoState;
use crate::errors::GitError;

/// Commit hash `master` and `HEAD` resolve to in [`StubRepo::dummy`].
pub const MASTER_SHA: &str = "55150afe539493d650889224db136bc8d9b7ecb8";

/// Commit hash `dev` resolves to in [`StubRepo::dummy`].
pub const DEV_SHA: &str = "11c8d6cd5d2f5c6a1a9b7d1b5c4e2f3a4b5c6d7e";

/// Repository state held in memory.
#[derive(Debug, Clone, Default)]
pub struct StubRepo {
    root: PathBuf,
    working_dir: PathBuf,
    current_branch: Option<String>,
    config: HashMap<String, Vec<String>>,
    revisions: HashMap<String, String>,
    remote_heads: HashMap<String, String>,
}

impl StubRepo {
    /// An empty repository rooted at `root`, HEAD detached.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            working_dir: root.clone(),
            root,
            ..Self::default()
        }
    }

    /// A repository at `/repo` on `master`, tracking `origin/master`, with
    /// `remote_url` as the origin URL.
    pub fn dummy(remote_url: &str) -> Self {
        Self::new("/repo")
            .with_current_branch(Some("master"))
            .with_config("remote.origin.url", remote_url)
            .with_config("branch.master.remote", "origin")
            .with_config("branch.master.merge", "refs/heads/master")
            .with_revision("master", MASTER_SHA)
            .with_revision("HEAD", MASTER_SHA)
            .with_revision("dev", DEV_SHA)
    }

    /// Move the repository to `root`, resolving relative paths from there.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self.working_dir = self.root.clone();
        self
    }

    /// Resolve relative paths from `dir`.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Set the checked-out branch; `None` detaches HEAD.
    #[must_use]
    pub fn with_current_branch(mut self, branch: Option<&str>) -> Self {
        self.current_branch = branch.map(String::from);
        self
    }

    /// Add a config value. Repeated keys accumulate like `git config --add`.
    #[must_use]
    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Make `revision` resolve to `sha`.
    #[must_use]
    pub fn with_revision(mut self, revision: &str, sha: &str) -> Self {
        self.revisions.insert(revision.to_string(), sha.to_string());
        self
    }

    /// Point `refs/remotes/<remote>/HEAD` at `branch`.
    #[must_use]
    pub fn with_remote_head(mut self, remote: &str, branch: &str) -> Self {
        self.remote_heads
            .insert(remote.to_string(), branch.to_string());
        self
    }
}

impl RepoState for StubRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        Ok(self.current_branch.clone())
    }

    fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        Ok(self.config.get(key).and_then(|v| v.last()).cloned())
    }

    fn config_get_all(&self, key: &str) -> Result<Vec<String>, GitError> {
        Ok(self.config.get(key).cloned().unwrap_or_default())
    }

    fn resolve_revision(&self, revision: &str) -> Result<String, GitError> {
        self.revisions
            .get(revision)
            .cloned()
            .ok_or_else(|| GitError::CommandFailed {
                command: "rev-parse".to_string(),
                message: format!("unknown revision {revision:?}"),
                exit_code: Some(1),
            })
    }

    fn remote_head(&self, remote: &str) -> Result<Option<String>, GitError> {
        Ok(self.remote_heads.get(remote).cloned())
    }
}
