//! Resolved web URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::page::LineRange;

/// `#L5`, `#L5-L10` (GitHub) and `#L5-10` (GitLab).
static L_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^L(\d+)(?:-L?(\d+))?$").expect("L_ANCHOR_RE is a valid regex")
});

/// `#lines-5` and `#lines-5:10` (Bitbucket).
static LINES_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^lines-(\d+)(?::(\d+))?$").expect("LINES_ANCHOR_RE is a valid regex")
});

/// A resolved URL to a hosted web page. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WebUrl(String);

impl WebUrl {
    pub(crate) fn new(url: String) -> Self {
        Self(url)
    }

    /// The URL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment after `#`, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.0.split_once('#').map(|(_, f)| f)
    }

    /// Recover the highlighted line range from the fragment anchor.
    pub fn line_range(&self) -> Option<LineRange> {
        parse_line_anchor(self.fragment()?)
    }
}

impl fmt::Display for WebUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WebUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<WebUrl> for String {
    fn from(url: WebUrl) -> Self {
        url.0
    }
}

/// Parse a line anchor in any provider's syntax (without the leading `#`).
pub fn parse_line_anchor(fragment: &str) -> Option<LineRange> {
    let caps = L_ANCHOR_RE
        .captures(fragment)
        .or_else(|| LINES_ANCHOR_RE.captures(fragment))?;

    let start: u32 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2) {
        Some(end) => LineRange::span(start, end.as_str().parse().ok()?).ok(),
        None => LineRange::single(start).ok(),
    }
}
