//! Log command (`vcsbrowse log`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// Open the commit history of a branch.
#[derive(Debug, Default, Args)]
pub struct LogArgs {
    /// Branch or revision (default: the upstream branch).
    #[arg(value_name = "REVISION")]
    pub revision: Option<String>,
}

impl LogArgs {
    /// Run the log command.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no history page.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let url = global.links(factory)?.log(self.revision.as_deref())?;
        global.open(factory, &url)
    }
}
