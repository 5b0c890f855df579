//! Run configuration gathered once at the process boundary
//!
//! The workflow itself never touches the environment; everything it needs
//! arrives through [`RunConfig`], so it can be driven by fakes in tests.

use crate::error::{Error, Result};
use crate::types::{ForgeConfig, MergeMethod};
use std::env;

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
/// Environment variable holding `owner/repo` (set by CI)
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
/// Environment variable holding the co-author username (action input)
pub const USERNAME_ENV: &str = "INPUT_USERNAME";

/// Everything a run needs, resolved up front
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Bearer token with repo + PR permissions
    pub token: String,
    /// Target repository
    pub forge: ForgeConfig,
    /// Workflow behavior
    pub options: RunOptions,
}

/// Workflow behavior knobs
///
/// These were fixed constants in earlier revisions; they are explicit here
/// so tests can substitute them.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Co-author's username on the forge
    pub coauthor: String,
    /// Branch the PR targets
    pub base_branch: String,
    /// Merge strategy for the immediate merge attempt
    pub merge_method: MergeMethod,
    /// Delete the source branch after a successful merge
    pub delete_branch: bool,
}

impl RunConfig {
    /// Assemble a config from optional flag values, falling back to the
    /// conventional CI environment variables.
    pub fn resolve(
        repo: Option<String>,
        username: Option<String>,
        host: Option<String>,
        base_branch: String,
        merge_method: MergeMethod,
        keep_branch: bool,
    ) -> Result<Self> {
        let token = env::var(TOKEN_ENV)
            .map_err(|_| Error::Config(format!("{TOKEN_ENV} is not set")))?;

        let repo = match repo {
            Some(r) => r,
            None => env::var(REPOSITORY_ENV).map_err(|_| {
                Error::Config(format!("pass --repo or set {REPOSITORY_ENV}"))
            })?,
        };
        let (owner, repo) = parse_repo(&repo)?;

        let coauthor = match username {
            Some(u) => u,
            None => env::var(USERNAME_ENV).map_err(|_| {
                Error::Config(format!("pass --username or set {USERNAME_ENV}"))
            })?,
        };

        Ok(Self {
            token,
            forge: ForgeConfig { owner, repo, host },
            options: RunOptions {
                coauthor,
                base_branch,
                merge_method,
                delete_branch: !keep_branch,
            },
        })
    }
}

/// Split an `owner/repo` identifier into its parts
pub fn parse_repo(repo: &str) -> Result<(String, String)> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(Error::Config(format!(
            "expected repository as owner/name, got '{repo}'"
        ))),
    }
}
