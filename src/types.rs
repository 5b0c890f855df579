//! Core types for coauthor-pr

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved user identity on the forge
///
/// Only the login and numeric id are ever read from the API; the email
/// used in commit metadata is always synthesized (never the real address).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Account login (username)
    pub login: String,
    /// Numeric account id
    pub id: u64,
}

impl Identity {
    /// Synthesize the forge's no-reply address for this identity:
    /// `<id>+<login>@users.noreply.<domain>`
    pub fn noreply_email(&self, domain: &str) -> String {
        format!("{}+{}@users.noreply.{domain}", self.id, self.login)
    }
}

/// Author/committer metadata for a created commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitAuthor {
    /// Display name (the actor's login)
    pub name: String,
    /// No-reply email
    pub email: String,
    /// Authoring timestamp (UTC, second resolution)
    pub date: DateTime<Utc>,
}

/// A created pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
}

/// Result of a merge attempt
///
/// A rejecting HTTP status never reaches this type (the API call errors
/// first); `merged: false` only occurs on a 2xx response.
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Whether the merge happened
    pub merged: bool,
    /// SHA of the merge commit (if merged)
    pub sha: Option<String>,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MergeMethod {
    /// Squash all commits into one
    #[default]
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

/// Forge connection configuration
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl ForgeConfig {
    /// Domain used for synthesized no-reply emails
    pub fn noreply_domain(&self) -> &str {
        self.host.as_deref().unwrap_or("github.com")
    }
}

/// What a completed run produced, for the terminal summary
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The created branch name
    pub branch: String,
    /// The created file name
    pub filename: String,
    /// The random file content
    pub content: String,
    /// The opened pull request
    pub pull_request: PullRequest,
    /// Merge method that was attempted
    pub merge_method: MergeMethod,
    /// Merge outcome (merged flag + SHA)
    pub merge: MergeResult,
    /// Whether the source branch was deleted after merge
    pub branch_deleted: bool,
}
