//! Factory for shared command dependencies.
//!
//! Provides lazy loading of configuration and access to the browser and the
//! local repository. Supports test mode with injected configuration, a stub
//! browser and in-memory repository state.

use std::path::Path;
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use tracing::debug;

use vcsbrowse_core::browser::{Browser, StubBrowser, SystemBrowser};
use vcsbrowse_core::cmdutil::existing_path;
use vcsbrowse_core::config::{Config, FileConfig};
use vcsbrowse_core::iostreams::{IOStreams, TestOutput};
use vcsbrowse_git::{AnalyzeOptions, Links, RepoState};

/// Shared factory providing lazily-initialized dependencies to all commands.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    /// Configuration (lazily loaded).
    config: OnceLock<Box<dyn Config>>,

    // Test overrides
    browser_stub: Option<Arc<StubBrowser>>,
    repo_override: Option<Arc<dyn RepoState>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version.
    pub fn new(app_version: String) -> Self {
        Self {
            app_version,
            io: IOStreams::system(),
            config: OnceLock::new(),
            browser_stub: None,
            repo_override: None,
        }
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();

        let factory = Self {
            app_version: "test".to_string(),
            io,
            config: OnceLock::new(),
            browser_stub: None,
            repo_override: None,
        };

        (factory, output)
    }

    /// Set a config override for testing.
    #[must_use]
    pub fn with_config(self, config: Box<dyn Config>) -> Self {
        let _ = self.config.set(config);
        self
    }

    /// Set a stub browser and return the shared reference for verification.
    pub fn with_stub_browser(mut self) -> (Self, Arc<StubBrowser>) {
        let stub = Arc::new(StubBrowser::default());
        self.browser_stub = Some(stub.clone());
        (self, stub)
    }

    /// Read repository state from `repo` instead of running git.
    #[must_use]
    pub fn with_repo(mut self, repo: Arc<dyn RepoState>) -> Self {
        self.repo_override = Some(repo);
        self
    }

    /// Get the configuration, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn config(&self) -> anyhow::Result<&dyn Config> {
        if let Some(cfg) = self.config.get() {
            return Ok(Box::as_ref(cfg));
        }
        let cfg = FileConfig::load().context("failed to load configuration")?;
        debug!(path = %cfg.path().display(), "loaded configuration");
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(Box::new(cfg));
        self.config
            .get()
            .map(Box::as_ref)
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))
    }

    /// Create a browser instance.
    ///
    /// The `launcher` flag wins over the configured browser; without either
    /// the system opener is used. In test mode with a stub browser, returns
    /// the stub.
    pub fn browser(&self, launcher: Option<&str>) -> Box<dyn Browser> {
        if let Some(ref stub) = self.browser_stub {
            return Box::new(StubBrowserWrapper(stub.clone()));
        }
        match self.launcher(launcher) {
            Some(launcher) => Box::new(SystemBrowser::with_launcher(launcher)),
            None => Box::new(SystemBrowser::new()),
        }
    }

    /// The launcher command: the flag, then the configured browser
    /// (`VCSBROWSE_BROWSER` or the `browser` key).
    fn launcher(&self, flag: Option<&str>) -> Option<String> {
        flag.map(String::from)
            .or_else(|| self.config().ok().and_then(|c| c.browser()))
    }

    /// Analyze the repository at `repo_dir` (default: the current directory).
    ///
    /// Configured host providers and default branch are applied.
    ///
    /// # Errors
    ///
    /// Returns an error if `repo_dir` does not exist, configuration cannot be
    /// loaded, or the repository has no usable remote.
    pub fn links(&self, repo_dir: Option<&Path>, branch: Option<&str>) -> anyhow::Result<Links> {
        let config = self.config()?;
        let options = AnalyzeOptions::default()
            .with_branch(branch.map(String::from))
            .with_providers(config.host_providers().clone())
            .with_default_branch(config.default_branch());

        if let Some(ref repo) = self.repo_override {
            return Ok(Links::from_state(repo.clone(), &options)?);
        }

        let dir = match repo_dir {
            Some(dir) => existing_path("--repo-dir", dir)?,
            None => Path::new("."),
        };
        Ok(vcsbrowse_git::analyze(dir, &options)?)
    }
}

/// Wrapper to use `Arc<StubBrowser>` as `Box<dyn Browser>`.
#[derive(Debug)]
struct StubBrowserWrapper(Arc<StubBrowser>);

impl Browser for StubBrowserWrapper {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        self.0.open(url)
    }
}
