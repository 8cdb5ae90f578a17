//! Core error types for vcsbrowse.

use crate::page::PageKind;
use crate::provider::Provider;

/// A page kind that cannot be expressed for a repository's provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} pages are not supported for {}", target(.provider, .wiki))]
pub struct UnsupportedOperation {
    /// The requested page kind.
    pub kind: PageKind,
    /// The repository's provider.
    pub provider: Provider,
    /// Whether the repository is a GitLab wiki.
    pub wiki: bool,
}

fn target(provider: &Provider, wiki: &bool) -> String {
    if *wiki {
        format!("{provider} wiki repositories")
    } else if provider.is_known() {
        format!("{provider} repositories")
    } else {
        "repositories on an unknown provider".to_string()
    }
}

/// Configuration-specific errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path of the config file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse config.
    #[error("failed to parse config: {0}")]
    Parse(String),
}
