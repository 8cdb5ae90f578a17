//! File-based configuration implementation.
//!
//! Reads `config.yml` from the vcsbrowse config directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{Config, config_dir, env_key};
use crate::errors::ConfigError;
use crate::provider::{Provider, normalize_hostname};

/// File-based configuration backed by a YAML file.
#[derive(Debug)]
pub struct FileConfig {
    path: PathBuf,
    data: ConfigData,
    hosts: HashMap<String, Provider>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigData {
    #[serde(default)]
    browser: Option<String>,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    hosts: HashMap<String, Provider>,
}

impl FileConfig {
    /// Load `config.yml` from [`config_dir`]. A missing file is an empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_dir().join("config.yml"))
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "no config file");
            return Ok(Self::with_data(path, ConfigData::default()));
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;
        let data = parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(Self::with_data(path, data))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_data(path: PathBuf, data: ConfigData) -> Self {
        let hosts = data
            .hosts
            .iter()
            .map(|(host, provider)| (normalize_hostname(host), *provider))
            .collect();
        Self { path, data, hosts }
    }

    fn get_file_value(&self, key: &str) -> Option<String> {
        match key {
            "browser" => self.data.browser.clone(),
            "default_branch" => self.data.default_branch.clone(),
            _ => None,
        }
    }
}

fn parse(content: &str) -> Result<ConfigData, ConfigError> {
    if content.trim().is_empty() {
        return Ok(ConfigData::default());
    }
    serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

impl Config for FileConfig {
    fn get(&self, key: &str) -> Option<String> {
        if let Ok(val) = std::env::var(env_key(key)) {
            return Some(val);
        }
        self.get_file_value(key)
    }

    fn host_providers(&self) -> &HashMap<String, Provider> {
        &self.hosts
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::{EnvVarGuard, env_lock};

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_should_load_config_file() {
        let _lock = env_lock();
        let _guards = [
            EnvVarGuard::unset("VCSBROWSE_BROWSER"),
            EnvVarGuard::unset("VCSBROWSE_DEFAULT_BRANCH"),
        ];
        let (_dir, path) = write_config(
            "browser: firefox --new-tab\n\
             default_branch: main\n\
             hosts:\n  Git.Example.com: gitlab\n  code.corp: github\n",
        );

        let cfg = FileConfig::load_from(&path).unwrap();
        assert_eq!(cfg.path(), path.as_path());
        assert_eq!(cfg.browser().as_deref(), Some("firefox --new-tab"));
        assert_eq!(cfg.default_branch().as_deref(), Some("main"));
        assert_eq!(
            cfg.host_providers().get("git.example.com"),
            Some(&Provider::GitLab)
        );
        assert_eq!(cfg.host_providers().get("code.corp"), Some(&Provider::GitHub));
    }

    #[test]
    fn test_should_treat_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = FileConfig::load_from(dir.path().join("config.yml")).unwrap();
        assert!(cfg.host_providers().is_empty());
    }

    #[test]
    fn test_should_load_empty_config_file() {
        let (_dir, path) = write_config("   \n");
        let cfg = FileConfig::load_from(&path).unwrap();
        assert!(cfg.host_providers().is_empty());
    }

    #[test]
    fn test_should_reject_unknown_provider_in_hosts() {
        let (_dir, path) = write_config("hosts:\n  git.example.com: gitea\n");
        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_should_reject_unknown_keys() {
        let (_dir, path) = write_config("editor: vim\n");
        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("editor"));
    }

    #[test]
    fn test_should_prefer_env_over_file() {
        let (_dir, path) = write_config("browser: firefox\ndefault_branch: main\n");
        let _lock = env_lock();
        let _guards = [
            EnvVarGuard::set("VCSBROWSE_BROWSER", "chromium"),
            EnvVarGuard::unset("VCSBROWSE_DEFAULT_BRANCH"),
        ];
        let cfg = FileConfig::load_from(&path).unwrap();
        assert_eq!(cfg.browser().as_deref(), Some("chromium"));
        assert_eq!(cfg.default_branch().as_deref(), Some("main"));
    }

    #[test]
    fn test_should_load_from_config_dir_env() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yml"), "default_branch: trunk\n").unwrap();
        let _lock = env_lock();
        let _guards = [
            EnvVarGuard::set(
                crate::config::CONFIG_DIR_ENV,
                dir.path().to_str().unwrap(),
            ),
            EnvVarGuard::unset("VCSBROWSE_DEFAULT_BRANCH"),
        ];

        let cfg = FileConfig::load().unwrap();
        assert_eq!(cfg.default_branch().as_deref(), Some("trunk"));
    }
}
