//! Git-related error types.

use std::path::PathBuf;

use vcsbrowse_core::{LineRangeError, ParseError, UnsupportedOperation};

/// Errors from git operations.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// Git command failed with an exit code.
    #[error("git {command} failed: {message}")]
    CommandFailed {
        /// The git subcommand that failed.
        command: String,
        /// Error message from stderr.
        message: String,
        /// Process exit code, if available.
        exit_code: Option<i32>,
    },

    /// Not inside a git repository.
    #[error("not a git repository: {}", .path.display())]
    NotARepository {
        /// The directory that was inspected.
        path: PathBuf,
    },

    /// Git binary not found.
    #[error("git executable not found in PATH")]
    NotFound,

    /// The branch has no remote URL to link to.
    #[error("branch `{branch}` does not have a remote")]
    NoRemote {
        /// Local branch name.
        branch: String,
    },

    /// I/O error from subprocess.
    #[error("git IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from deriving a link for a local repository.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Reading the repository failed.
    #[error(transparent)]
    Git(#[from] GitError),

    /// The remote URL could not be understood.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The provider has no such page.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedOperation),

    /// A line range was malformed.
    #[error(transparent)]
    InvalidLineRange(#[from] LineRangeError),

    /// A file lies outside the repository working tree.
    #[error("{} is outside repository at {}", .path.display(), .root.display())]
    PathOutsideRepository {
        /// The offending path.
        path: PathBuf,
        /// Repository root.
        root: PathBuf,
    },
}
