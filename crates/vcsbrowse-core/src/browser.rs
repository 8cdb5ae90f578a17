//! Browser integration for opening URLs.

use anyhow::Context;
use tracing::debug;

/// Trait for opening URLs in a browser.
pub trait Browser: Send + Sync + std::fmt::Debug {
    /// Open a URL in the user's browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be opened.
    fn open(&self, url: &str) -> anyhow::Result<()>;
}

/// System browser: the OS default opener, or a user-configured launcher.
#[derive(Debug, Clone, Default)]
pub struct SystemBrowser {
    launcher: Option<String>,
}

impl SystemBrowser {
    /// Create a browser that uses the system default.
    pub fn new() -> Self {
        Self { launcher: None }
    }

    /// Create a browser with a specific launcher command.
    ///
    /// The command is split with shell quoting rules; the URL is appended
    /// as the last argument. An empty launcher means the system default.
    pub fn with_launcher(launcher: impl Into<String>) -> Self {
        let launcher = launcher.into();
        Self {
            launcher: Some(launcher).filter(|l| !l.trim().is_empty()),
        }
    }
}

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        let Some(launcher) = &self.launcher else {
            debug!(url, "opening with system default browser");
            return open::that(url).with_context(|| format!("failed to open {url}"));
        };

        let parts = launcher_argv(launcher);
        let Some((program, args)) = parts.split_first() else {
            return open::that(url).with_context(|| format!("failed to open {url}"));
        };

        debug!(program, ?args, url, "opening with launcher");
        std::process::Command::new(program)
            .args(args)
            .arg(url)
            .spawn()
            .with_context(|| format!("failed to run browser command {launcher:?}"))?;
        Ok(())
    }
}

/// Split a launcher command; unbalanced quotes fall back to the raw string.
fn launcher_argv(launcher: &str) -> Vec<String> {
    shlex::split(launcher).unwrap_or_else(|| vec![launcher.to_string()])
}

/// Stub browser for testing that records URLs instead of opening them.
#[derive(Debug, Default)]
pub struct StubBrowser {
    /// URLs that were "opened".
    pub urls: std::sync::Mutex<Vec<String>>,
}

impl StubBrowser {
    /// Snapshot of the URLs opened so far.
    pub fn opened(&self) -> Vec<String> {
        self.urls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Browser for StubBrowser {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        let mut urls = self
            .urls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        urls.push(url.to_string());
        Ok(())
    }
}
