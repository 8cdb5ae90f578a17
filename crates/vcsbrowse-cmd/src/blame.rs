//! Blame command (`vcsbrowse blame`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::file::FileLocation;
use crate::global::GlobalArgs;

/// Open line-by-line authorship of a file.
#[derive(Debug, Args)]
pub struct BlameArgs {
    #[command(flatten)]
    location: FileLocation,
}

impl BlameArgs {
    /// Run the blame command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, lies outside the
    /// repository, or the provider has no blame page.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let loc = &self.location;
        let file = global.check_file(&loc.file)?;
        let url = global.links(factory)?.blame(
            file,
            loc.lines,
            loc.revision.as_deref(),
            loc.permalink.into(),
        )?;
        global.open(factory, &url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use vcsbrowse_core::LineRange;
    use vcsbrowse_git::testing::{MASTER_SHA, StubRepo};

    use super::*;
    use crate::file::PermalinkMode;
    use crate::test_helpers::TestHarness;

    #[rstest]
    #[case(
        "git@github.com:USER/PROJECT.git",
        "https://github.com/USER/PROJECT/blame/{sha}/README.md#L3"
    )]
    #[case(
        "git@gitlab.com:USER/PROJECT.git",
        "https://gitlab.com/USER/PROJECT/blame/{sha}/README.md#L3"
    )]
    #[case(
        "git@bitbucket.org:USER/PROJECT.git",
        "https://bitbucket.org/USER/PROJECT/annotate/{sha}/README.md#lines-3"
    )]
    fn test_should_open_blame(#[case] remote: &str, #[case] expected: &str) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), "# Project\n").unwrap();
        let h = TestHarness::with_repo(StubRepo::dummy(remote).with_root(dir.path()));
        let global = GlobalArgs {
            repo_dir: Some(dir.path().to_path_buf()),
            ..GlobalArgs::default()
        };

        let args = BlameArgs {
            location: FileLocation {
                lines: Some(LineRange::Single(3)),
                ..FileLocation::new("README.md")
            },
        };
        args.run(&h.factory, &global).unwrap();
        assert_eq!(h.opened_urls(), vec![expected.replace("{sha}", MASTER_SHA)]);
    }

    #[test]
    fn test_should_fail_for_wiki() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Home.md"), "home\n").unwrap();
        let repo = StubRepo::dummy("git@gitlab.com:USER/PROJECT.wiki.git").with_root(dir.path());
        let h = TestHarness::with_repo(repo);
        let global = GlobalArgs {
            repo_dir: Some(dir.path().to_path_buf()),
            ..GlobalArgs::default()
        };

        let args = BlameArgs {
            location: FileLocation {
                permalink: PermalinkMode::No,
                ..FileLocation::new("Home.md")
            },
        };
        let err = args.run(&h.factory, &global).unwrap_err();
        assert!(err.to_string().starts_with("blame pages are not supported"));
    }
}
