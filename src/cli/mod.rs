//! CLI argument parsing and command execution

mod run;
pub mod style;

pub use run::run;

use clap::Parser;
use coauthor_pr::types::MergeMethod;

/// Create and merge a pull request co-authored with another user
#[derive(Debug, Parser)]
#[command(name = "coauthor-pr", version, about)]
pub struct Cli {
    /// Target repository as owner/name (default: $GITHUB_REPOSITORY)
    #[arg(long)]
    pub repo: Option<String>,

    /// Co-author's GitHub username (default: $INPUT_USERNAME)
    #[arg(long)]
    pub username: Option<String>,

    /// GitHub Enterprise host (default: github.com)
    #[arg(long)]
    pub host: Option<String>,

    /// Base branch the pull request targets
    #[arg(long, default_value = "main")]
    pub base: String,

    /// Merge strategy for the immediate merge attempt
    #[arg(long, value_enum, default_value_t = MergeMethod::Squash)]
    pub merge_method: MergeMethod,

    /// Keep the source branch after a successful merge
    #[arg(long)]
    pub keep_branch: bool,
}
