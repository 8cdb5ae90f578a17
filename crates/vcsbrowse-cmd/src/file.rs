//! File command (`vcsbrowse file`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use vcsbrowse_core::{LineRange, Permalink};

use crate::factory::Factory;
use crate::global::GlobalArgs;

/// When to pin a link to a commit hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PermalinkMode {
    /// Pin when lines are given.
    #[default]
    Auto,
    /// Always pin.
    Yes,
    /// Never pin.
    No,
}

impl From<PermalinkMode> for Permalink {
    fn from(mode: PermalinkMode) -> Self {
        match mode {
            PermalinkMode::Auto => Self::Auto,
            PermalinkMode::Yes => Self::Yes,
            PermalinkMode::No => Self::No,
        }
    }
}

/// A file, optional lines and revision.
#[derive(Debug, Clone, Args)]
pub struct FileLocation {
    /// File to link to.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Line or line range to highlight, e.g. 5 or 5-10.
    #[arg(value_name = "LINES")]
    pub lines: Option<LineRange>,

    /// Branch, tag or commit to show the file at.
    #[arg(value_name = "REVISION")]
    pub revision: Option<String>,

    /// Pin the link to a commit hash.
    #[arg(long, value_enum, default_value_t = PermalinkMode::Auto)]
    pub permalink: PermalinkMode,
}

impl FileLocation {
    /// A whole-file location with default options.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            lines: None,
            revision: None,
            permalink: PermalinkMode::Auto,
        }
    }
}

/// Open a file's contents.
#[derive(Debug, Args)]
pub struct FileArgs {
    #[command(flatten)]
    location: FileLocation,
}

impl FileArgs {
    /// Run the file command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, lies outside the
    /// repository, or its revision cannot be resolved.
    pub fn run(&self, factory: &Factory, global: &GlobalArgs) -> Result<()> {
        let loc = &self.location;
        let file = global.check_file(&loc.file)?;
        let url = global.links(factory)?.file(
            file,
            loc.lines,
            loc.revision.as_deref(),
            loc.permalink.into(),
        )?;
        global.open(factory, &url)
    }
}
