//! Commit command (`vcsbrowse commit`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// Open a commit page.
#[derive(Debug, Args)]
pub struct CommitArgs {
    /// Revision naming the commit.
    #[arg(value_name = "REVISION", default_value = "HEAD")]
    pub revision: String,
}

impl CommitArgs {
    /// Run the commit command.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let url = global.links(factory)?.commit(&self.revision)?;
        global.open(factory, &url)
    }
}
