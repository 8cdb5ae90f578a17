//! Shared test utilities for command testing.

use std::sync::Arc;

use vcsbrowse_core::browser::StubBrowser;
use vcsbrowse_core::config::MemoryConfig;
use vcsbrowse_core::iostreams::TestOutput;
use vcsbrowse_git::testing::StubRepo;

use crate::factory::Factory;

/// Remote URL of the repository [`TestHarness::new`] links to.
pub const GITHUB_REMOTE: &str = "git@github.com:USER/PROJECT.git";

/// A test harness with factory, output capture and a stub browser.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Stub browser for verifying opened URLs.
    pub browser: Arc<StubBrowser>,
}

impl TestHarness {
    /// A harness on `master` of `git@github.com:USER/PROJECT.git`.
    pub fn new() -> Self {
        Self::with_repo(StubRepo::dummy(GITHUB_REMOTE))
    }

    /// A harness reading the given repository state with empty config.
    pub fn with_repo(repo: StubRepo) -> Self {
        Self::with_repo_and_config(repo, MemoryConfig::new())
    }

    /// A harness with custom repository state and config.
    pub fn with_repo_and_config(repo: StubRepo, config: MemoryConfig) -> Self {
        let (factory, output) = Factory::test();
        let (factory, browser) = factory.with_stub_browser();
        let factory = factory
            .with_config(Box::new(config))
            .with_repo(Arc::new(repo));

        Self {
            factory,
            output,
            browser,
        }
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }

    /// Get URLs opened in the stub browser.
    pub fn opened_urls(&self) -> Vec<String> {
        self.browser.opened()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_test_harness() {
        let h = TestHarness::new();
        assert!(h.stdout().is_empty());
        assert!(h.stderr().is_empty());
        assert!(h.opened_urls().is_empty());
    }

    #[test]
    fn test_should_capture_output_through_factory() {
        let h = TestHarness::new();
        h.factory.io.println_out("hello from test");
        assert_eq!(h.stdout(), "hello from test\n");
    }

    #[test]
    fn test_should_record_browser_opens() {
        let h = TestHarness::new();
        h.factory.browser(None).open("https://example.com").unwrap();
        assert_eq!(h.opened_urls(), vec!["https://example.com".to_string()]);
    }
}
