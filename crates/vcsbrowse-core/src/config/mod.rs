//! Configuration for vcsbrowse.
//!
//! Settings live in `config.yml` inside [`config_dir`]. Scalar keys can be
//! overridden with `VCSBROWSE_<KEY>` environment variables.

mod file_config;
mod memory_config;

use std::collections::HashMap;

pub use file_config::FileConfig;
pub use memory_config::MemoryConfig;

use crate::provider::Provider;

/// Environment variable that relocates the configuration directory.
pub const CONFIG_DIR_ENV: &str = "VCSBROWSE_CONFIG_DIR";

/// Configuration directory path (usually ~/.config/vcsbrowse).
pub fn config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return std::path::PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(".config")
                .join("vcsbrowse")
        },
        |d| d.join("vcsbrowse"),
    )
}

/// Configuration trait for accessing settings.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get a scalar config value.
    fn get(&self, key: &str) -> Option<String>;

    /// Provider overrides keyed by hostname.
    fn host_providers(&self) -> &HashMap<String, Provider>;

    /// The browser launcher command.
    fn browser(&self) -> Option<String> {
        self.get("browser").filter(|b| !b.is_empty())
    }

    /// The branch treated as the repository's default branch.
    fn default_branch(&self) -> Option<String> {
        self.get("default_branch").filter(|b| !b.is_empty())
    }
}

fn env_key(key: &str) -> String {
    format!("VCSBROWSE_{}", key.to_uppercase())
}
