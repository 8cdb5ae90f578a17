//! Pull request command (`vcsbrowse pull-request`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// Open the pull request form for the current branch.
#[derive(Debug, Default, Args)]
pub struct PullRequestArgs {}

impl PullRequestArgs {
    /// Run the pull-request command.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no pull request page.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let url = global.links(factory)?.pull_request()?;
        global.open(factory, &url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use vcsbrowse_git::testing::StubRepo;

    use super::*;
    use crate::test_helpers::TestHarness;

    #[rstest]
    #[case(
        "git@github.com:USER/PROJECT.git",
        "https://github.com/USER/PROJECT/pull/new/feature/login"
    )]
    #[case(
        "git@gitlab.com:USER/PROJECT.git",
        "https://gitlab.com/USER/PROJECT/merge_requests/new?merge_request%5Bsource_branch%5D=feature%2Flogin"
    )]
    #[case(
        "git@bitbucket.org:USER/PROJECT.git",
        "https://bitbucket.org/USER/PROJECT/pull-requests/new?source=feature%2Flogin"
    )]
    fn test_should_open_pull_request_form(#[case] remote: &str, #[case] expected: &str) {
        let repo = StubRepo::dummy(remote)
            .with_current_branch(Some("feature/login"))
            .with_config("branch.feature/login.remote", "origin")
            .with_config("branch.feature/login.merge", "refs/heads/feature/login");
        let h = TestHarness::with_repo(repo);
        PullRequestArgs {}
            .run(&h.factory, &GlobalArgs::default())
            .unwrap();
        assert_eq!(h.opened_urls(), vec![expected.to_string()]);
    }

    #[test]
    fn test_should_fail_for_wiki() {
        let h = TestHarness::with_repo(StubRepo::dummy("git@gitlab.com:USER/PROJECT.wiki.git"));
        let err = PullRequestArgs {}
            .run(&h.factory, &GlobalArgs::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("pull request pages are not supported"));
    }
}
