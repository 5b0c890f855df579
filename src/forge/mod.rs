//! Forge services for the GitHub REST API
//!
//! Provides a trait seam over the forge so the workflow can run against
//! fakes in tests.

mod github;

pub use github::GitHubForge;

use crate::error::Result;
use crate::types::{CommitAuthor, ForgeConfig, Identity, MergeMethod, MergeResult, PullRequest};
use async_trait::async_trait;

/// Forge operations the workflow depends on
///
/// Each method maps to exactly one REST call. Every method returns an error
/// on any non-success status; callers decide which failures are fatal.
#[async_trait]
pub trait ForgeService: Send + Sync {
    /// Resolve the authenticated actor's identity
    async fn authenticated_user(&self) -> Result<Identity>;

    /// Resolve a user by login
    async fn user(&self, login: &str) -> Result<Identity>;

    /// Read the tip commit SHA of a branch
    async fn branch_sha(&self, branch: &str) -> Result<String>;

    /// Create a branch ref pointing at a commit
    async fn create_ref(&self, branch: &str, sha: &str) -> Result<()>;

    /// Create a blob from raw bytes, returning its SHA
    async fn create_blob(&self, content: &[u8]) -> Result<String>;

    /// Read the tree SHA of a commit
    async fn commit_tree_sha(&self, commit_sha: &str) -> Result<String>;

    /// Create a tree layering one file entry on a base tree, returning its SHA
    async fn create_tree(&self, base_tree: &str, path: &str, blob_sha: &str) -> Result<String>;

    /// Create a commit, returning its SHA
    ///
    /// The same identity is used as author and committer.
    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
        author: &CommitAuthor,
    ) -> Result<String>;

    /// Advance an existing branch ref to a new commit
    async fn update_ref(&self, branch: &str, sha: &str) -> Result<()>;

    /// Open a pull request
    async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<PullRequest>;

    /// Attempt to merge a pull request
    ///
    /// A rejecting status (branch protection, required checks) is an error,
    /// like every other write. `merged: false` can only come back on a 2xx.
    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<MergeResult>;

    /// Delete a branch ref
    async fn delete_ref(&self, branch: &str) -> Result<()>;

    /// The forge configuration
    fn config(&self) -> &ForgeConfig;
}
