//! Remote repository descriptors.
//!
//! A [`RemoteDescriptor`] is the provider-neutral view of a remote URL:
//! where the repository is hosted and under which owner and project name.

use std::fmt;

use url::Url;

use crate::provider::Provider;

/// A hosted repository identified by host, owner and project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteDescriptor {
    host: String,
    owner: String,
    project: String,
    provider: Provider,
    wiki: bool,
}

impl RemoteDescriptor {
    /// Create a descriptor, detecting the provider from the host.
    pub fn new(
        host: impl Into<String>,
        owner: impl Into<String>,
        project: impl Into<String>,
    ) -> Self {
        let host = crate::provider::normalize_hostname(&host.into());
        let provider = Provider::detect(&host);
        let mut descriptor = Self {
            host,
            owner: owner.into(),
            project: project.into(),
            provider,
            wiki: false,
        };
        descriptor.detect_wiki();
        descriptor
    }

    /// Build a descriptor from a normalized remote URL.
    ///
    /// The last path segment is the project; everything before it is the
    /// owner, which keeps GitLab subgroups (`group/subgroup`) intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no host or fewer than two path segments.
    pub fn from_url(u: &Url) -> Result<Self, ParseError> {
        let invalid = || ParseError::new(u.as_str());

        let host = u.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?;
        let host = match (u.scheme(), u.port()) {
            ("http" | "https", Some(port)) => format!("{host}:{port}"),
            _ => host.to_string(),
        };

        let path = u.path().trim_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        let (project, owner) = parts.split_last().ok_or_else(invalid)?;
        Ok(Self::new(host, owner.join("/"), *project))
    }

    /// Override the detected provider.
    ///
    /// Used for self-hosted instances configured by the user.
    #[must_use]
    pub fn with_provider(mut self, provider: Provider) -> Self {
        if self.wiki {
            self.project.push_str(".wiki");
            self.wiki = false;
        }
        self.provider = provider;
        self.detect_wiki();
        self
    }

    fn detect_wiki(&mut self) {
        if self.provider == Provider::GitLab
            && let Some(stripped) = self.project.strip_suffix(".wiki")
            && !stripped.is_empty()
        {
            self.project = stripped.to_string();
            self.wiki = true;
        }
    }

    /// Hostname, with a port for HTTP remotes served on a non-default port.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Repository owner (user, organization, or group path).
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Project name, without `.git` or `.wiki` suffix.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The hosting provider.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Whether this remote is a GitLab wiki repository.
    pub fn is_wiki(&self) -> bool {
        self.wiki
    }

    /// The web URL of the repository's front page.
    pub fn root_url(&self) -> String {
        let base = format!("https://{}/{}/{}", self.host, self.owner, self.project);
        if self.wiki {
            format!("{base}/wikis")
        } else {
            base
        }
    }
}

impl fmt::Display for RemoteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.project)
    }
}

/// A remote URL that matches none of the recognized forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported remote URL: {url}")]
pub struct ParseError {
    /// The URL as given.
    pub url: String,
}

impl ParseError {
    /// Create a parse error for the given URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
