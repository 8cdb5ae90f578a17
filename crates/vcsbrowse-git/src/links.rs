//! Web links for a local repository.
//!
//! [`analyze`] inspects a working copy once and returns [`Links`], which
//! answers every page query against the chosen branch and remote.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};
use vcsbrowse_core::provider::normalize_hostname;
use vcsbrowse_core::{
    FileTarget, LineRange, PageRequest, Permalink, Provider, RemoteDescriptor, WebUrl, resolve,
    root_page,
};

use crate::context::{GitRepo, LocalBranch, RepoState, choose_local_branch, default_branch};
use crate::errors::{GitError, LinkError};
use crate::url_parser::parse_remote_url;

/// How to interpret a repository.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Link for this branch instead of choosing one.
    pub branch: Option<String>,
    /// Provider overrides for self-hosted instances, keyed by hostname.
    pub providers: HashMap<String, Provider>,
    /// The default branch, instead of asking the remote.
    pub default_branch: Option<String>,
}

impl AnalyzeOptions {
    /// Use the given branch.
    #[must_use]
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    /// Treat `host` as running `provider`.
    #[must_use]
    pub fn with_provider(mut self, host: &str, provider: Provider) -> Self {
        self.providers.insert(normalize_hostname(host), provider);
        self
    }

    /// Use all the given provider overrides.
    #[must_use]
    pub fn with_providers(mut self, providers: HashMap<String, Provider>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// Use the given default branch.
    #[must_use]
    pub fn with_default_branch(mut self, branch: Option<String>) -> Self {
        self.default_branch = branch;
        self
    }

    fn describe(&self, url: &str) -> Result<RemoteDescriptor, LinkError> {
        let remote = parse_remote_url(url)?;
        let host = normalize_hostname(remote.host());
        Ok(match self.providers.get(&host) {
            Some(&provider) => remote.with_provider(provider),
            None => remote,
        })
    }
}

/// Page links for one branch of a local repository.
#[derive(Debug, Clone)]
pub struct Links {
    repo: Arc<dyn RepoState>,
    remote: RemoteDescriptor,
    branch: LocalBranch,
    default_branch: String,
}

impl Links {
    /// Derive links from repository state.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch has no remote or the remote URL is not
    /// a hosted repository.
    #[instrument(skip_all, fields(root = %repo.root().display()))]
    pub fn from_state(
        repo: Arc<dyn RepoState>,
        options: &AnalyzeOptions,
    ) -> Result<Self, LinkError> {
        let current = repo.current_branch()?;

        let default_branch = match &options.default_branch {
            Some(branch) => branch.clone(),
            None => default_branch(&*repo, options.branch.as_deref().or(current.as_deref()))?,
        };

        let branch = choose_local_branch(
            &*repo,
            options.branch.as_deref(),
            current.as_deref(),
            &default_branch,
            |url| options.describe(url).is_ok_and(|r| r.provider().is_known()),
        )?;

        let url = repo.remote_url(branch.name())?;
        let remote = options.describe(&url)?;
        debug!(
            branch = branch.name(),
            upstream = branch.upstream(),
            %remote,
            provider = %remote.provider(),
            "analyzed repository"
        );

        Ok(Self {
            repo,
            remote,
            branch,
            default_branch,
        })
    }

    /// The hosted repository links point to.
    pub fn remote(&self) -> &RemoteDescriptor {
        &self.remote
    }

    /// The branch links are made for.
    pub fn branch(&self) -> &LocalBranch {
        &self.branch
    }

    /// The repository's default branch.
    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// The local repository.
    pub fn repo(&self) -> &dyn RepoState {
        &*self.repo
    }

    /// Repository front page.
    pub fn root(&self) -> WebUrl {
        root_page(&self.remote)
    }

    /// Directory listing of `branch`, by default the upstream branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no tree page.
    pub fn tree(&self, branch: Option<&str>) -> Result<WebUrl, LinkError> {
        self.page(&PageRequest::Tree {
            branch: self.branch_or_upstream(branch),
        })
    }

    /// A commit page. The revision is resolved to its full hash first.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit or the
    /// provider has no commit page.
    pub fn commit(&self, revision: &str) -> Result<WebUrl, LinkError> {
        let revision = self.repo.resolve_revision(revision)?;
        self.page(&PageRequest::Commit { revision })
    }

    /// History of `branch`, by default the upstream branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no log page.
    pub fn log(&self, branch: Option<&str>) -> Result<WebUrl, LinkError> {
        self.page(&PageRequest::Log {
            branch: self.branch_or_upstream(branch),
        })
    }

    /// Contents of a file.
    ///
    /// Permalinks use the commit hash of `revision` (default: the default
    /// branch); otherwise the upstream branch name is used as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is outside the repository, the revision
    /// cannot be resolved, or the provider has no file page.
    pub fn file(
        &self,
        path: &Path,
        lines: Option<LineRange>,
        revision: Option<&str>,
        permalink: Permalink,
    ) -> Result<WebUrl, LinkError> {
        let (revision, target) = self.file_location(path, lines, revision, permalink)?;
        self.page(&PageRequest::File { revision, target })
    }

    /// Authorship of a file, with the same revision rules as [`Links::file`].
    ///
    /// # Errors
    ///
    /// Returns an error if the path is outside the repository, the revision
    /// cannot be resolved, or the provider has no blame page.
    pub fn blame(
        &self,
        path: &Path,
        lines: Option<LineRange>,
        revision: Option<&str>,
        permalink: Permalink,
    ) -> Result<WebUrl, LinkError> {
        let (revision, target) = self.file_location(path, lines, revision, permalink)?;
        self.page(&PageRequest::Blame { revision, target })
    }

    /// Comparison between two revisions.
    ///
    /// `base` defaults to the upstream branch. With `head` absent the
    /// comparison is from the default branch to `base`. Permalinks resolve
    /// both sides to commit hashes.
    ///
    /// # Errors
    ///
    /// Returns an error if a revision cannot be resolved or the provider has
    /// no diff page.
    pub fn diff(
        &self,
        base: Option<&str>,
        head: Option<&str>,
        permalink: bool,
    ) -> Result<WebUrl, LinkError> {
        let mut base = self.branch_or_upstream(base);
        let mut head = head.map(String::from);

        if permalink {
            base = self.repo.resolve_revision(&base)?;
            head = head
                .map(|h| self.repo.resolve_revision(&h))
                .transpose()?;
        }

        let (base, head) = match head {
            Some(head) => (base, head),
            None => (self.default_branch.clone(), base),
        };
        self.page(&PageRequest::Diff { base, head })
    }

    /// Form for proposing the upstream branch as a pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no pull request page.
    pub fn pull_request(&self) -> Result<WebUrl, LinkError> {
        self.page(&PageRequest::PullRequest {
            branch: self.branch.upstream().to_string(),
        })
    }

    /// Whether the branch still has to be proposed as a pull request.
    pub fn needs_pull_request(&self) -> bool {
        self.branch.needs_pull_request(&self.default_branch)
    }

    /// The most useful page for the branch.
    ///
    /// A branch awaiting a pull request gets the pull request form, the
    /// default branch gets the front page, anything else its tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no such page.
    pub fn auto(&self) -> Result<WebUrl, LinkError> {
        if self.remote.is_wiki() {
            return Ok(self.root());
        }
        if self.needs_pull_request() {
            self.pull_request()
        } else if self.branch.upstream() == self.default_branch {
            Ok(self.root())
        } else {
            self.tree(None)
        }
    }

    fn page(&self, request: &PageRequest) -> Result<WebUrl, LinkError> {
        Ok(resolve(&self.remote, request)?)
    }

    fn branch_or_upstream(&self, branch: Option<&str>) -> String {
        branch.map_or_else(|| self.branch.upstream().to_string(), String::from)
    }

    fn file_location(
        &self,
        path: &Path,
        lines: Option<LineRange>,
        revision: Option<&str>,
        permalink: Permalink,
    ) -> Result<(String, FileTarget), LinkError> {
        let relpath = self.repo.relpath(path)?;
        let revision = if permalink.resolve(lines.is_some()) {
            self.repo
                .resolve_revision(revision.unwrap_or(&self.default_branch))?
        } else {
            revision.map_or_else(|| self.branch.upstream().to_string(), String::from)
        };
        Ok((revision, FileTarget::new(relpath).with_lines(lines)))
    }
}

/// Inspect the repository containing `path`.
///
/// # Errors
///
/// Returns an error if `path` is not in a git repository, or the branch has
/// no usable remote.
pub fn analyze(path: &Path, options: &AnalyzeOptions) -> Result<Links, LinkError> {
    let repo = GitRepo::discover(path)?;
    Links::from_state(Arc::new(repo), options)
}

/// Front page of the repository containing `path`.
///
/// # Errors
///
/// See [`analyze`].
pub fn root(path: &Path) -> Result<WebUrl, LinkError> {
    Ok(analyze(path, &AnalyzeOptions::default())?.root())
}

/// Tree page of the repository containing `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::tree`].
pub fn tree(path: &Path, branch: Option<&str>) -> Result<WebUrl, LinkError> {
    analyze(path, &AnalyzeOptions::default())?.tree(branch)
}

/// Commit page in the repository containing `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::commit`].
pub fn commit(path: &Path, revision: &str) -> Result<WebUrl, LinkError> {
    analyze(path, &AnalyzeOptions::default())?.commit(revision)
}

/// Log page of the repository containing `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::log`].
pub fn log(path: &Path, branch: Option<&str>) -> Result<WebUrl, LinkError> {
    analyze(path, &AnalyzeOptions::default())?.log(branch)
}

/// File page for `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::file`].
pub fn file(
    path: &Path,
    lines: Option<LineRange>,
    revision: Option<&str>,
    permalink: Permalink,
) -> Result<WebUrl, LinkError> {
    let path = std::path::absolute(path).map_err(GitError::from)?;
    analyze(&path, &AnalyzeOptions::default())?.file(&path, lines, revision, permalink)
}

/// Blame page for `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::blame`].
pub fn blame(
    path: &Path,
    lines: Option<LineRange>,
    revision: Option<&str>,
    permalink: Permalink,
) -> Result<WebUrl, LinkError> {
    let path = std::path::absolute(path).map_err(GitError::from)?;
    analyze(&path, &AnalyzeOptions::default())?.blame(&path, lines, revision, permalink)
}

/// Diff page in the repository containing `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::diff`].
pub fn diff(
    path: &Path,
    base: Option<&str>,
    head: Option<&str>,
    permalink: bool,
) -> Result<WebUrl, LinkError> {
    analyze(path, &AnalyzeOptions::default())?.diff(base, head, permalink)
}

/// Pull request page for the current branch of the repository at `path`.
///
/// # Errors
///
/// See [`analyze`] and [`Links::pull_request`].
pub fn pull_request(path: &Path) -> Result<WebUrl, LinkError> {
    analyze(path, &AnalyzeOptions::default())?.pull_request()
}
