//! Diff command (`vcsbrowse diff`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// Open a comparison between two revisions.
///
/// With one revision the comparison runs from the default branch to it; with
/// none, to the upstream branch.
#[derive(Debug, Default, Args)]
pub struct DiffArgs {
    /// Base revision, or the head when REVISION2 is absent.
    #[arg(value_name = "REVISION1")]
    pub revision1: Option<String>,

    /// Head revision.
    #[arg(value_name = "REVISION2")]
    pub revision2: Option<String>,

    /// Resolve revisions to commit hashes.
    #[arg(long)]
    pub permalink: bool,
}

impl DiffArgs {
    /// Run the diff command.
    ///
    /// # Errors
    ///
    /// Returns an error if a revision cannot be resolved or the provider has
    /// no comparison page.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let url = global.links(factory)?.diff(
            self.revision1.as_deref(),
            self.revision2.as_deref(),
            self.permalink,
        )?;
        global.open(factory, &url)
    }
}
