//! Local git repository inspection for vcsbrowse.
//!
//! Reads a working copy's branch and remote configuration through the `git`
//! binary and turns it into hosted web page links. Start with
//! [`analyze`] or one of the one-shot helpers such as [`file`].

pub mod client;
pub mod context;
pub mod errors;
pub mod links;
pub mod remote;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod url_parser;

pub use context::{GitRepo, LocalBranch, RepoState};
pub use errors::{GitError, LinkError};
pub use links::{
    AnalyzeOptions, Links, analyze, blame, commit, diff, file, log, pull_request, root, tree,
};
