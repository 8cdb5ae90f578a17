//! Flags shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use vcsbrowse_core::cmdutil::existing_path;
use vcsbrowse_core::{WebUrl, ios_eprintln, ios_println};
use vcsbrowse_git::Links;

use crate::factory::Factory;

/// Options accepted before or after any subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Print the URL instead of opening it.
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Command that opens the URL, e.g. "firefox --new-tab".
    #[arg(long, global = true, value_name = "CMD")]
    pub browser: Option<String>,

    /// Run as if started in PATH.
    #[arg(short = 'C', long, global = true, value_name = "PATH")]
    pub repo_dir: Option<PathBuf>,

    /// Link for this local branch instead of the checked-out one.
    #[arg(short, long, global = true, value_name = "NAME")]
    pub branch: Option<String>,
}

impl GlobalArgs {
    /// Analyze the selected repository and branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be analyzed.
    pub fn links(&self, factory: &Factory) -> Result<Links> {
        factory.links(self.repo_dir.as_deref(), self.branch.as_deref())
    }

    /// Check that a FILE argument exists.
    ///
    /// Relative paths are taken from `--repo-dir` when given.
    ///
    /// # Errors
    ///
    /// Returns a flag error when the file does not exist.
    pub fn check_file<'a>(&self, file: &'a Path) -> Result<&'a Path> {
        let located = match &self.repo_dir {
            Some(dir) if file.is_relative() => dir.join(file),
            _ => file.to_path_buf(),
        };
        existing_path("FILE", &located)?;
        Ok(file)
    }

    /// Print the URL on a dry run, otherwise open it in the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser cannot be launched.
    pub fn open(&self, factory: &Factory, url: &WebUrl) -> Result<()> {
        let ios = &factory.io;
        if self.dry_run {
            ios_println!(ios, "{url}");
            return Ok(());
        }

        factory
            .browser(self.browser.as_deref())
            .open(url.as_str())
            .with_context(|| format!("failed to open {url}"))?;
        let cs = ios.color_scheme();
        ios_eprintln!(
            ios,
            "{} Opening {} in your browser",
            cs.success_icon(),
            cs.cyan(url.as_str())
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_helpers::TestHarness;

    #[test]
    fn test_should_print_url_on_dry_run() {
        let h = TestHarness::new();
        let global = GlobalArgs {
            dry_run: true,
            ..GlobalArgs::default()
        };
        let url = h.factory.links(None, None).unwrap().root();
        global.open(&h.factory, &url).unwrap();
        assert_eq!(h.stdout(), "https://github.com/USER/PROJECT\n");
        assert!(h.stderr().is_empty());
        assert!(h.opened_urls().is_empty());
    }

    #[test]
    fn test_should_open_url_and_report() {
        let h = TestHarness::new();
        let url = h.factory.links(None, None).unwrap().root();
        GlobalArgs::default().open(&h.factory, &url).unwrap();
        assert_eq!(h.opened_urls(), vec!["https://github.com/USER/PROJECT".to_string()]);
        assert_eq!(
            h.stderr(),
            "✓ Opening https://github.com/USER/PROJECT in your browser\n"
        );
        assert!(h.stdout().is_empty());
    }

    #[test]
    fn test_should_check_file_relative_to_repo_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("setup.py"), "").unwrap();
        let global = GlobalArgs {
            repo_dir: Some(dir.path().to_path_buf()),
            ..GlobalArgs::default()
        };
        assert!(global.check_file(Path::new("setup.py")).is_ok());

        let err = global.check_file(Path::new("missing.py")).unwrap_err();
        assert!(vcsbrowse_core::cmdutil::is_flag_error(&err));
        assert!(err.to_string().starts_with("invalid value for FILE"));
    }
}
