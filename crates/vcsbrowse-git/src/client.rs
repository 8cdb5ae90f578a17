//! Git client that wraps the git command-line tool.
//!
//! Every query is a blocking `git` invocation; only repository metadata is
//! read, nothing is ever written.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use crate::errors::GitError;

/// Client for executing git commands.
#[derive(Debug, Clone)]
pub struct GitClient {
    /// Path to the git binary.
    git_path: PathBuf,
    /// Working directory for git commands.
    repo_dir: Option<PathBuf>,
}

impl GitClient {
    /// Create a new git client using the system git.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not found in PATH.
    pub fn new() -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotFound)?;

        Ok(Self {
            git_path,
            repo_dir: None,
        })
    }

    /// Set the working directory.
    #[must_use]
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    /// Get the repository directory, if set.
    pub fn repo_dir(&self) -> Option<&Path> {
        self.repo_dir.as_deref()
    }

    /// Execute a git command and return stdout.
    #[instrument(skip(self), fields(args = ?args))]
    /// Build a git invocation. Messages are forced to the C locale so
    /// stderr can be matched.
    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(args).env("LC_ALL", "C");

        if let Some(ref dir) = self.repo_dir {
            cmd.current_dir(dir);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.command(args).output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let command = args.first().copied().unwrap_or("").to_string();
            debug!(%command, code = ?output.status.code(), "git command failed");
            return Err(GitError::CommandFailed {
                command,
                message: stderr.trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Get the top-level directory of the repository.
    ///
    /// # Errors
    ///
    /// Returns `NotARepository` if the working directory is not inside a
    /// git working tree.
    pub fn top_level_dir(&self) -> Result<PathBuf, GitError> {
        let not_a_repo = || GitError::NotARepository {
            path: self.repo_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
        };

        if self.repo_dir.as_deref().is_some_and(|d| !d.is_dir()) {
            return Err(not_a_repo());
        }

        match self.run(&["rev-parse", "--show-toplevel"]) {
            Ok(output) => match first_line(&output) {
                "" => Err(not_a_repo()),
                line => Ok(PathBuf::from(line)),
            },
            Err(GitError::CommandFailed { message, .. })
                if message.contains("not a git repository") =>
            {
                Err(not_a_repo())
            }
            Err(e) => Err(e),
        }
    }

    /// Get the current branch name, or `None` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails for another reason.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        match self.run(&["symbolic-ref", "--quiet", "HEAD"]) {
            Ok(output) => {
                let branch = first_line(&output);
                Ok(Some(
                    branch
                        .strip_prefix("refs/heads/")
                        .unwrap_or(branch)
                        .to_string(),
                ))
            }
            Err(GitError::CommandFailed { message, .. }) if message.is_empty() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a git config value, or `None` if the key is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails for another reason.
    pub fn config_get(&self, key: &str) -> Result<Option<String>, GitError> {
        match self.run(&["config", "--get", key]) {
            Ok(output) => Ok(Some(first_line(&output).to_string())),
            Err(GitError::CommandFailed {
                exit_code: Some(1), ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get every value of a multi-valued git config key.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails for a reason other than the
    /// key being unset.
    pub fn config_get_all(&self, key: &str) -> Result<Vec<String>, GitError> {
        match self.run(&["config", "--get-all", key]) {
            Ok(output) => Ok(output
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect()),
            Err(GitError::CommandFailed {
                exit_code: Some(1), ..
            }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Resolve a revision to a full commit hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit.
    pub fn rev_parse_verify(&self, revision: &str) -> Result<String, GitError> {
        let spec = format!("{revision}^{{commit}}");
        match self.run(&["rev-parse", "--verify", "--quiet", &spec]) {
            Ok(output) => Ok(first_line(&output).to_string()),
            Err(GitError::CommandFailed { exit_code, .. }) => Err(GitError::CommandFailed {
                command: "rev-parse".to_string(),
                message: format!("unknown revision {revision:?}"),
                exit_code,
            }),
            Err(e) => Err(e),
        }
    }

    /// The branch a remote's `HEAD` points to, from `refs/remotes/<remote>/HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the git command fails for a reason other than the
    /// ref being absent.
    pub fn remote_head(&self, remote: &str) -> Result<Option<String>, GitError> {
        let head_ref = format!("refs/remotes/{remote}/HEAD");
        match self.run(&["symbolic-ref", "--quiet", &head_ref]) {
            Ok(output) => {
                let prefix = format!("refs/remotes/{remote}/");
                Ok(first_line(&output)
                    .strip_prefix(&prefix)
                    .filter(|b| !b.is_empty())
                    .map(String::from))
            }
            Err(GitError::CommandFailed { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Get the first line of output.
fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("")
}
