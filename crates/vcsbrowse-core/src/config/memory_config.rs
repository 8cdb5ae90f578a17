//! In-memory configuration for testing.

use std::collections::HashMap;

use super::Config;
use crate::provider::{Provider, normalize_hostname};

/// In-memory configuration for testing.
///
/// No disk I/O and no environment lookups are performed.
///
/// # Examples
///
/// ```
/// use vcsbrowse_core::config::{Config, MemoryConfig};
/// use vcsbrowse_core::provider::Provider;
///
/// let config = MemoryConfig::new()
///     .with("default_branch", "main")
///     .with_host_provider("git.example.com", Provider::GitLab);
///
/// assert_eq!(config.default_branch().as_deref(), Some("main"));
/// assert_eq!(
///     config.host_providers().get("git.example.com"),
///     Some(&Provider::GitLab)
/// );
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfig {
    values: HashMap<String, String>,
    hosts: HashMap<String, Provider>,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar value.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Map a host to a provider.
    #[must_use]
    pub fn with_host_provider(mut self, host: &str, provider: Provider) -> Self {
        self.hosts.insert(normalize_hostname(host), provider);
        self
    }
}

impl Config for MemoryConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn host_providers(&self) -> &HashMap<String, Provider> {
        &self.hosts
    }
}
