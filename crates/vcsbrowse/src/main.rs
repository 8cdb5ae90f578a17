//! vcsbrowse - open hosted repository pages from a local git working copy.
//!
//! Resolves the GitHub, GitLab or Bitbucket page for the current branch,
//! a file, a commit or a comparison and opens it in the web browser.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vcsbrowse_cmd::factory::Factory;
use vcsbrowse_cmd::global::GlobalArgs;

/// Process exit codes.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const USAGE: i32 = 2;
}

/// Open the web page of a local git repository.
#[derive(Debug, Parser)]
#[command(
    name = "vcsbrowse",
    version,
    about = "Open the web page of a local git repository",
    long_about = "Open the GitHub, GitLab or Bitbucket page of the current branch, a file, \
                  a commit or a comparison. Without a subcommand, opens the most useful page \
                  for the current branch."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the pull request form, front page or branch tree, whichever fits.
    Auto(vcsbrowse_cmd::auto::AutoArgs),
    /// Open the repository's front page.
    Root(vcsbrowse_cmd::root::RootArgs),
    /// Open a commit.
    Commit(vcsbrowse_cmd::commit::CommitArgs),
    /// Open the commit history of a branch.
    Log(vcsbrowse_cmd::log::LogArgs),
    /// Open a file, optionally highlighting lines.
    File(vcsbrowse_cmd::file::FileArgs),
    /// Open line-by-line authorship of a file.
    Blame(vcsbrowse_cmd::blame::BlameArgs),
    /// Open a comparison between two revisions.
    Diff(vcsbrowse_cmd::diff::DiffArgs),
    /// Open the pull request form for the current branch.
    #[command(name = "pull-request")]
    PullRequest(vcsbrowse_cmd::pull_request::PullRequestArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VCSBROWSE_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string());
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Auto(vcsbrowse_cmd::auto::AutoArgs::default()));

    let exit_code = match run_command(command, &factory, &cli.global) {
        Ok(()) => exit_codes::OK,
        Err(e) => {
            tracing::error!("{e:#}");
            if vcsbrowse_core::cmdutil::is_flag_error(&e) {
                exit_codes::USAGE
            } else {
                exit_codes::ERROR
            }
        }
    };

    std::process::exit(exit_code);
}

fn run_command(cmd: Commands, factory: &Factory, global: &GlobalArgs) -> anyhow::Result<()> {
    match cmd {
        Commands::Auto(args) => args.run(factory, global),
        Commands::Root(args) => args.run(factory, global),
        Commands::Commit(args) => args.run(factory, global),
        Commands::Log(args) => args.run(factory, global),
        Commands::File(args) => args.run(factory, global),
        Commands::Blame(args) => args.run(factory, global),
        Commands::Diff(args) => args.run(factory, global),
        Commands::PullRequest(args) => args.run(factory, global),
    }
}
