//! Page requests: which hosted web page a caller wants to link to.

use std::fmt;
use std::str::FromStr;

/// The category of hosted web page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// Repository front page.
    Root,
    /// Directory listing of a branch.
    Tree,
    /// A single commit.
    Commit,
    /// File contents at a revision.
    File,
    /// Commit history of a branch.
    Log,
    /// Comparison between two revisions.
    Diff,
    /// Line-by-line authorship of a file.
    Blame,
    /// Pull/merge request submission form.
    PullRequest,
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Root => "root",
            Self::Tree => "tree",
            Self::Commit => "commit",
            Self::File => "file",
            Self::Log => "log",
            Self::Diff => "diff",
            Self::Blame => "blame",
            Self::PullRequest => "pull request",
        };
        f.write_str(name)
    }
}

/// A line or an inclusive span of lines, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRange {
    /// One line.
    Single(u32),
    /// Lines `start..=end`.
    Span(u32, u32),
}

impl LineRange {
    /// Create a single-line range.
    ///
    /// # Errors
    ///
    /// Returns an error for line 0.
    pub fn single(line: u32) -> Result<Self, LineRangeError> {
        if line == 0 {
            return Err(LineRangeError(line.to_string()));
        }
        Ok(Self::Single(line))
    }

    /// Create a span of lines.
    ///
    /// # Errors
    ///
    /// Returns an error for line 0 or when `end` precedes `start`.
    pub fn span(start: u32, end: u32) -> Result<Self, LineRangeError> {
        if start == 0 || end < start {
            return Err(LineRangeError(format!("{start}-{end}")));
        }
        Ok(Self::Span(start, end))
    }

    /// First line of the range.
    pub fn start(self) -> u32 {
        match self {
            Self::Single(n) | Self::Span(n, _) => n,
        }
    }

    /// Last line of the range.
    pub fn end(self) -> u32 {
        match self {
            Self::Single(n) | Self::Span(_, n) => n,
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(n) => write!(f, "{n}"),
            Self::Span(a, b) => write!(f, "{a}-{b}"),
        }
    }
}

impl FromStr for LineRange {
    type Err = LineRangeError;

    /// Parse `"5"` or `"5-10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LineRangeError(s.to_string());
        let number = |part: &str| part.trim().parse::<u32>().map_err(|_| invalid());

        match s.split_once('-') {
            Some((start, end)) => Self::span(number(start)?, number(end)?),
            None => Self::single(number(s)?),
        }
    }
}

/// Line range text that is not `N` or `A-B` with `1 <= A <= B`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line range {0:?}: expected a line number or START-END")]
pub struct LineRangeError(pub String);

/// Whether a link should be pinned to a commit hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Permalink {
    /// Pin only when a line range is requested.
    #[default]
    Auto,
    /// Always pin.
    Yes,
    /// Never pin; use the branch name or revision as given.
    No,
}

impl Permalink {
    /// Decide whether to pin, given whether lines were requested.
    pub fn resolve(self, has_lines: bool) -> bool {
        match self {
            Self::Auto => has_lines,
            Self::Yes => true,
            Self::No => false,
        }
    }
}

/// A file location inside the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    /// Path relative to the repository root, `/`-separated.
    pub path: String,
    /// Optional lines to highlight.
    pub lines: Option<LineRange>,
}

impl FileTarget {
    /// A whole-file target.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            lines: None,
        }
    }

    /// Highlight the given lines.
    #[must_use]
    pub fn with_lines(mut self, lines: Option<LineRange>) -> Self {
        self.lines = lines;
        self
    }
}

/// A request for one hosted page.
///
/// Each variant carries only what its page needs, so a line range can only
/// be attached to pages that show file contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRequest {
    /// Repository front page.
    Root,
    /// Directory listing of a branch.
    Tree {
        /// Branch name.
        branch: String,
    },
    /// A single commit.
    Commit {
        /// Commit hash (or any commit-ish the provider understands).
        revision: String,
    },
    /// File contents at a revision.
    File {
        /// Branch name or commit hash.
        revision: String,
        /// The file and lines.
        target: FileTarget,
    },
    /// History of a branch.
    Log {
        /// Branch name or revision.
        branch: String,
    },
    /// Comparison `base...head`.
    Diff {
        /// Base revision.
        base: String,
        /// Head revision.
        head: String,
    },
    /// Authorship of a file at a revision.
    Blame {
        /// Branch name or commit hash.
        revision: String,
        /// The file and lines.
        target: FileTarget,
    },
    /// Pull/merge request submission form for a branch.
    PullRequest {
        /// Source branch on the remote.
        branch: String,
    },
}

impl PageRequest {
    /// The page kind of this request.
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Root => PageKind::Root,
            Self::Tree { .. } => PageKind::Tree,
            Self::Commit { .. } => PageKind::Commit,
            Self::File { .. } => PageKind::File,
            Self::Log { .. } => PageKind::Log,
            Self::Diff { .. } => PageKind::Diff,
            Self::Blame { .. } => PageKind::Blame,
            Self::PullRequest { .. } => PageKind::PullRequest,
        }
    }

    /// The requested line range, if any.
    pub fn lines(&self) -> Option<LineRange> {
        match self {
            Self::File { target, .. } | Self::Blame { target, .. } => target.lines,
            _ => None,
        }
    }
}
