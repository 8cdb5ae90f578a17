//! Root command (`vcsbrowse root`).

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// Open the repository's front page.
#[derive(Debug, Default, Args)]
pub struct RootArgs {}

impl RootArgs {
    /// Run the root command.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be analyzed or the browser
    /// cannot be opened.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let url = global.links(factory)?.root();
        global.open(factory, &url)
    }
}
