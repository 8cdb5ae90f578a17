//! Local repository context.
//!
//! [`RepoState`] is the read-only view of a working copy that link
//! derivation needs: configuration values, the checked-out branch and
//! revision lookup. [`GitRepo`] answers those questions with the `git`
//! binary; tests substitute `StubRepo` from the `testing` module.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::client::GitClient;
use crate::errors::{GitError, LinkError};
use crate::remote::{DEFAULT_REMOTE, RemoteRef, choose_url};

/// Default branch used when neither configuration nor the remote's `HEAD`
/// names one.
pub const FALLBACK_DEFAULT_BRANCH: &str = "master";

/// Read-only repository state.
pub trait RepoState: Send + Sync + std::fmt::Debug {
    /// Root of the working tree.
    fn root(&self) -> &Path;

    /// Directory relative paths are resolved against.
    fn working_dir(&self) -> &Path;

    /// The checked-out branch, or `None` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn current_branch(&self) -> Result<Option<String>, GitError>;

    /// A single git config value.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn config_get(&self, key: &str) -> Result<Option<String>, GitError>;

    /// All values of a multi-valued git config key.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn config_get_all(&self, key: &str) -> Result<Vec<String>, GitError>;

    /// Resolve a revision to a full commit hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit.
    fn resolve_revision(&self, revision: &str) -> Result<String, GitError>;

    /// The branch `refs/remotes/<remote>/HEAD` points to.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn remote_head(&self, remote: &str) -> Result<Option<String>, GitError>;

    /// The remote a branch pushes to.
    ///
    /// Checks `branch.<b>.remote`, `branch.<b>.pushRemote` and
    /// `remote.pushDefault` in that order. Values naming a local path are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn remote_of_branch(&self, branch: &str) -> Result<Option<RemoteRef>, GitError> {
        let keys = [
            format!("branch.{branch}.remote"),
            format!("branch.{branch}.pushRemote"),
            "remote.pushDefault".to_string(),
        ];
        for key in &keys {
            if let Some(remote) = self.config_get(key)?.as_deref().and_then(RemoteRef::parse) {
                debug!(branch, %key, ?remote, "found remote for branch");
                return Ok(Some(remote));
            }
        }
        Ok(None)
    }

    /// Every URL of the branch's remote (`origin` when none is configured).
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn remote_urls(&self, branch: &str) -> Result<Vec<String>, GitError> {
        match self.remote_of_branch(branch)? {
            Some(RemoteRef::Url(url)) => Ok(vec![url]),
            Some(RemoteRef::Named(name)) => self.config_get_all(&format!("remote.{name}.url")),
            None => self.config_get_all(&format!("remote.{DEFAULT_REMOTE}.url")),
        }
    }

    /// The remote URL to link a branch to.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoRemote`] when the branch's remote has no URL.
    fn remote_url(&self, branch: &str) -> Result<String, GitError> {
        let urls = self.remote_urls(branch)?;
        choose_url(&urls)
            .map(String::from)
            .ok_or_else(|| GitError::NoRemote {
                branch: branch.to_string(),
            })
    }

    /// The upstream branch name: `branch.<b>.merge` without `refs/heads/`,
    /// or the branch itself when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    fn remote_branch(&self, branch: &str) -> Result<String, GitError> {
        let merge = self.config_get(&format!("branch.{branch}.merge"))?;
        Ok(match merge {
            Some(merge) if !merge.is_empty() => merge
                .strip_prefix("refs/heads/")
                .unwrap_or(&merge)
                .to_string(),
            _ => branch.to_string(),
        })
    }

    /// Express `path` relative to the repository root, `/`-separated.
    ///
    /// Relative paths are taken from [`RepoState::working_dir`]. The path
    /// need not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::PathOutsideRepository`] for paths outside the
    /// working tree.
    fn relpath(&self, path: &Path) -> Result<String, LinkError> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir().join(path)
        };
        let absolute = resolve_path(&absolute);
        let root = resolve_path(self.root());

        let rel = absolute
            .strip_prefix(&root)
            .map_err(|_| LinkError::PathOutsideRepository {
                path: path.to_path_buf(),
                root: root.clone(),
            })?;

        Ok(rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/"))
    }
}

/// A working copy read through the `git` binary.
#[derive(Debug, Clone)]
pub struct GitRepo {
    client: GitClient,
    root: PathBuf,
    working_dir: PathBuf,
}

impl GitRepo {
    /// Find the repository containing `path`, a file or directory.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if `path` is not inside a git
    /// working tree, or [`GitError::NotFound`] without a git binary.
    pub fn discover(path: &Path) -> Result<Self, GitError> {
        let path = std::path::absolute(path)?;
        let working_dir = if path.is_dir() {
            path
        } else {
            path.parent().map_or_else(|| path.clone(), Path::to_path_buf)
        };

        let client = GitClient::new()?.with_repo_dir(&working_dir);
        let root = client.top_level_dir()?;
        debug!(root = %root.display(), "found repository");

        Ok(Self {
            client,
            root,
            working_dir,
        })
    }
}

impl RepoState for GitRepo {
    fn root(&self) -> &Path {
        &self.root
    }

    fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn current_branch(&self) -> Result<Option<String>, GitError> {
        self.client.current_branch()
    }

    fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        self.client.config_get(key)
    }

    fn config_get_all(&self, key: &str) -> Result<Vec<String>, GitError> {
        self.client.config_get_all(key)
    }

    fn resolve_revision(&self, revision: &str) -> Result<String, GitError> {
        self.client.rev_parse_verify(revision)
    }

    fn remote_head(&self, remote: &str) -> Result<Option<String>, GitError> {
        self.client.remote_head(remote)
    }
}

/// A local branch and where it is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    name: String,
    remote: Option<RemoteRef>,
    upstream: String,
}

impl LocalBranch {
    /// Read a branch's remote and upstream from the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub fn load(repo: &dyn RepoState, name: &str) -> Result<Self, GitError> {
        Ok(Self {
            name: name.to_string(),
            remote: repo.remote_of_branch(name)?,
            upstream: repo.remote_branch(name)?,
        })
    }

    /// Local branch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured remote, if any.
    pub fn remote(&self) -> Option<&RemoteRef> {
        self.remote.as_ref()
    }

    /// The branch name on the remote.
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Whether work on this branch still has to be proposed as a pull request.
    ///
    /// Branches pushed to `origin` and the default branch itself do not.
    pub fn needs_pull_request(&self, default_branch: &str) -> bool {
        let pushes_to_origin =
            self.remote.as_ref().and_then(RemoteRef::name) == Some(DEFAULT_REMOTE);
        !(self.name == default_branch || pushes_to_origin)
    }
}

/// Determine the repository's default branch from the remote's `HEAD`.
///
/// `hint` is the branch whose remote is consulted; `origin` is used when it
/// has none. Falls back to [`FALLBACK_DEFAULT_BRANCH`].
///
/// # Errors
///
/// Returns an error if the repository cannot be read.
pub fn default_branch(repo: &dyn RepoState, hint: Option<&str>) -> Result<String, GitError> {
    let remote = match hint {
        Some(branch) => repo.remote_of_branch(branch)?,
        None => None,
    };
    let remote = remote
        .as_ref()
        .and_then(RemoteRef::name)
        .unwrap_or(DEFAULT_REMOTE);

    let branch = repo
        .remote_head(remote)?
        .unwrap_or_else(|| FALLBACK_DEFAULT_BRANCH.to_string());
    debug!(remote, %branch, "determined default branch");
    Ok(branch)
}

/// Choose the local branch to link for.
///
/// An explicitly requested branch wins. Otherwise the checked-out branch is
/// used when its remote is supported; a detached HEAD or an unsupported
/// remote falls back to the default branch.
///
/// # Errors
///
/// Returns an error if the repository cannot be read.
pub fn choose_local_branch(
    repo: &dyn RepoState,
    requested: Option<&str>,
    current: Option<&str>,
    default_branch: &str,
    is_supported: impl Fn(&str) -> bool,
) -> Result<LocalBranch, GitError> {
    if let Some(name) = requested {
        return LocalBranch::load(repo, name);
    }

    if let Some(name) = current {
        match repo.remote_url(name) {
            Ok(url) if is_supported(&url) => return LocalBranch::load(repo, name),
            Ok(url) => debug!(branch = name, %url, "remote not supported, using default branch"),
            Err(e) => debug!(branch = name, error = %e, "no usable remote, using default branch"),
        }
    } else {
        debug!("HEAD is detached, using default branch");
    }

    LocalBranch::load(repo, default_branch)
}

/// Make a path absolute and canonical as far as it exists.
///
/// The longest existing ancestor is canonicalized (resolving symlinks) and
/// the remaining components are appended.
fn resolve_path(path: &Path) -> PathBuf {
    let path = normalize_lexically(path);
    let mut existing = path.as_path();
    let mut tail: Vec<OsString> = Vec::new();

    loop {
        if let Ok(canonical) = std::fs::canonicalize(existing) {
            return tail.iter().rev().fold(canonical, |acc, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return path,
        }
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
