//! Git remote selection.

use tracing::debug;

/// Name of the remote git creates on clone.
pub const DEFAULT_REMOTE: &str = "origin";

/// Provider names looked for in remote URLs, in order of preference.
const PREFERRED_HOSTS: [&str; 3] = ["gitlab", "github", "bitbucket"];

/// What a `branch.<name>.remote` style config value refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRef {
    /// A configured remote such as `origin`.
    Named(String),
    /// A URL used directly as the remote.
    Url(String),
}

impl RemoteRef {
    /// Classify a remote config value.
    ///
    /// Local paths (`.`, `./x`, `/srv/x`) have no web page and yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || is_filesystem_path(value) {
            None
        } else if value.contains(':') {
            Some(Self::Url(value.to_string()))
        } else {
            Some(Self::Named(value.to_string()))
        }
    }

    /// The remote name, if this is a named remote.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Url(_) => None,
        }
    }
}

/// Pick the URL to link to when a remote has several.
///
/// Prefers URLs mentioning a known provider (GitLab first, then GitHub, then
/// Bitbucket), otherwise the first URL.
pub fn choose_url(urls: &[String]) -> Option<&str> {
    let chosen = PREFERRED_HOSTS
        .iter()
        .find_map(|host| urls.iter().find(|url| url.contains(host)))
        .or_else(|| urls.first())
        .map(String::as_str);
    debug!(?urls, ?chosen, "chose remote url");
    chosen
}

fn is_filesystem_path(p: &str) -> bool {
    p == "." || p.starts_with("./") || p.starts_with("../") || p.starts_with('/')
}
