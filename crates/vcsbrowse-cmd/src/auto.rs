//! Auto command (`vcsbrowse` / `vcsbrowse auto`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// Open the most useful page for the current branch.
///
/// That is the pull request form for a branch pushed to a fork, the front
/// page on the default branch and the branch's tree otherwise.
#[derive(Debug, Default, Args)]
pub struct AutoArgs {}

impl AutoArgs {
    /// Run the auto command.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be analyzed or the provider
    /// has no matching page.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let url = global.links(factory)?.auto()?;
        global.open(factory, &url)
    }
}
