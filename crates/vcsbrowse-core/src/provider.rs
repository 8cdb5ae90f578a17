//! Hosting provider detection.
//!
//! A provider decides which URL conventions apply to a repository. Detection
//! works on the remote's hostname; user configuration can override it for
//! self-hosted instances whose names give nothing away.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Known GitHub cloud hostname.
pub const GITHUB_COM: &str = "github.com";

/// Known GitLab cloud hostname.
pub const GITLAB_COM: &str = "gitlab.com";

/// Known Bitbucket cloud hostname.
pub const BITBUCKET_ORG: &str = "bitbucket.org";

/// A code hosting service with its own web URL layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// github.com or GitHub Enterprise.
    GitHub,
    /// gitlab.com or a self-managed GitLab.
    GitLab,
    /// bitbucket.org.
    Bitbucket,
    /// Anything else. Only the repository root can be linked.
    Unknown,
}

impl Provider {
    /// Detect the provider from a hostname.
    ///
    /// The cloud hostnames match exactly. Other hosts match when they
    /// mention a provider name, so `gitlab.example.com` is GitLab.
    pub fn detect(host: &str) -> Self {
        let host = normalize_hostname(host);
        match host.as_str() {
            GITHUB_COM => return Self::GitHub,
            GITLAB_COM => return Self::GitLab,
            BITBUCKET_ORG => return Self::Bitbucket,
            _ => {}
        }

        if host.contains("gitlab") {
            Self::GitLab
        } else if host.contains("github") {
            Self::GitHub
        } else if host.contains("bitbucket") {
            Self::Bitbucket
        } else {
            Self::Unknown
        }
    }

    /// Whether the provider has known URL conventions.
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Lowercase name, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::GitHub => "GitHub",
            Self::GitLab => "GitLab",
            Self::Bitbucket => "Bitbucket",
            Self::Unknown => "unknown provider",
        };
        f.write_str(name)
    }
}

impl FromStr for Provider {
    type Err = UnknownProviderName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            "bitbucket" => Ok(Self::Bitbucket),
            "unknown" => Ok(Self::Unknown),
            _ => Err(UnknownProviderName(s.to_string())),
        }
    }
}

/// A provider name that is not one of `github`, `gitlab`, `bitbucket`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider {0:?} (expected github, gitlab or bitbucket)")]
pub struct UnknownProviderName(pub String);

/// Normalize a hostname by removing protocol, trailing slashes and case.
pub fn normalize_hostname(host: &str) -> String {
    let host = host
        .strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host);

    host.trim_end_matches('/').to_lowercase()
}
