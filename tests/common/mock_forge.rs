//! Mock forge service for testing
//!
//! Manually implemented rather than generated, with call tracking and
//! error injection so tests can verify exactly what the workflow sent.

#![allow(dead_code)]

use async_trait::async_trait;
use coauthor_pr::error::{Error, Result};
use coauthor_pr::forge::ForgeService;
use coauthor_pr::types::{
    CommitAuthor, ForgeConfig, Identity, MergeMethod, MergeResult, PullRequest,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Call record for `create_tree`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTreeCall {
    pub base_tree: String,
    pub path: String,
    pub blob_sha: String,
}

/// Call record for `create_commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommitCall {
    pub message: String,
    pub tree_sha: String,
    pub parent_sha: String,
    pub author: CommitAuthor,
}

/// Call record for `create_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

/// In-memory forge with configurable responses
pub struct MockForge {
    config: ForgeConfig,
    authenticated: Identity,
    users: Mutex<HashMap<String, Identity>>,
    branch_shas: Mutex<HashMap<String, String>>,
    commit_trees: Mutex<HashMap<String, String>>,
    next_sha: AtomicU64,
    // Call tracking
    created_refs: Mutex<Vec<(String, String)>>,
    blobs: Mutex<Vec<Vec<u8>>>,
    create_tree_calls: Mutex<Vec<CreateTreeCall>>,
    create_commit_calls: Mutex<Vec<CreateCommitCall>>,
    update_ref_calls: Mutex<Vec<(String, String)>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    merge_calls: Mutex<Vec<(u64, MergeMethod)>>,
    delete_calls: Mutex<Vec<String>>,
    // Configurable responses
    merge_response: Mutex<(bool, Option<String>)>,
    // Error injection
    error_on_create_tree: Mutex<Option<String>>,
    merge_error_status: Mutex<Option<u16>>,
    error_on_delete: Mutex<Option<String>>,
}

impl MockForge {
    /// A forge for `octo/repo` on github.com, authenticated as `robot` (id 7)
    pub fn new() -> Self {
        Self {
            config: ForgeConfig {
                owner: "octo".to_string(),
                repo: "repo".to_string(),
                host: None,
            },
            authenticated: Identity {
                login: "robot".to_string(),
                id: 7,
            },
            users: Mutex::new(HashMap::new()),
            branch_shas: Mutex::new(HashMap::new()),
            commit_trees: Mutex::new(HashMap::new()),
            next_sha: AtomicU64::new(1),
            created_refs: Mutex::new(Vec::new()),
            blobs: Mutex::new(Vec::new()),
            create_tree_calls: Mutex::new(Vec::new()),
            create_commit_calls: Mutex::new(Vec::new()),
            update_ref_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
            merge_response: Mutex::new((true, Some("merge-sha".to_string()))),
            error_on_create_tree: Mutex::new(None),
            merge_error_status: Mutex::new(None),
            error_on_delete: Mutex::new(None),
        }
    }

    // === Setup ===

    /// Register a user the forge can resolve. `requested` is the name looked
    /// up; the identity is what comes back (logins may differ in case).
    pub fn add_user(&self, requested: &str, login: &str, id: u64) {
        self.users.lock().unwrap().insert(
            requested.to_string(),
            Identity {
                login: login.to_string(),
                id,
            },
        );
    }

    /// Set the tip SHA for a branch and its commit's tree SHA
    pub fn add_branch(&self, branch: &str, sha: &str, tree_sha: &str) {
        self.branch_shas
            .lock()
            .unwrap()
            .insert(branch.to_string(), sha.to_string());
        self.commit_trees
            .lock()
            .unwrap()
            .insert(sha.to_string(), tree_sha.to_string());
    }

    /// Override the merge response (default: merged with `merge-sha`)
    pub fn set_merge_response(&self, merged: bool, sha: Option<&str>) {
        *self.merge_response.lock().unwrap() = (merged, sha.map(String::from));
    }

    // === Error injection ===

    /// Make `create_tree` fail
    pub fn fail_create_tree(&self, msg: &str) {
        *self.error_on_create_tree.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge_pull_request` fail with an HTTP status
    pub fn fail_merge_with_status(&self, status: u16) {
        *self.merge_error_status.lock().unwrap() = Some(status);
    }

    /// Make `delete_ref` fail
    pub fn fail_delete_ref(&self, msg: &str) {
        *self.error_on_delete.lock().unwrap() = Some(msg.to_string());
    }

    // === Call inspection ===

    pub fn created_refs(&self) -> Vec<(String, String)> {
        self.created_refs.lock().unwrap().clone()
    }

    pub fn blobs(&self) -> Vec<Vec<u8>> {
        self.blobs.lock().unwrap().clone()
    }

    pub fn create_tree_calls(&self) -> Vec<CreateTreeCall> {
        self.create_tree_calls.lock().unwrap().clone()
    }

    pub fn create_commit_calls(&self) -> Vec<CreateCommitCall> {
        self.create_commit_calls.lock().unwrap().clone()
    }

    pub fn update_ref_calls(&self) -> Vec<(String, String)> {
        self.update_ref_calls.lock().unwrap().clone()
    }

    pub fn create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<(u64, MergeMethod)> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    fn mint_sha(&self, kind: &str) -> String {
        let n = self.next_sha.fetch_add(1, Ordering::SeqCst);
        format!("{kind}-{n}")
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ForgeService for MockForge {
    async fn authenticated_user(&self) -> Result<Identity> {
        Ok(self.authenticated.clone())
    }

    async fn user(&self, login: &str) -> Result<Identity> {
        self.users
            .lock()
            .unwrap()
            .get(login)
            .cloned()
            .ok_or_else(|| Error::api("GET", format!("/users/{login}"), 404, "Not Found".into()))
    }

    async fn branch_sha(&self, branch: &str) -> Result<String> {
        self.branch_shas
            .lock()
            .unwrap()
            .get(branch)
            .cloned()
            .ok_or_else(|| {
                Error::api(
                    "GET",
                    format!("/git/ref/heads/{branch}"),
                    404,
                    "Not Found".into(),
                )
            })
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> Result<()> {
        self.created_refs
            .lock()
            .unwrap()
            .push((branch.to_string(), sha.to_string()));
        Ok(())
    }

    async fn create_blob(&self, content: &[u8]) -> Result<String> {
        self.blobs.lock().unwrap().push(content.to_vec());
        Ok(self.mint_sha("blob"))
    }

    async fn commit_tree_sha(&self, commit_sha: &str) -> Result<String> {
        self.commit_trees
            .lock()
            .unwrap()
            .get(commit_sha)
            .cloned()
            .ok_or_else(|| {
                Error::api(
                    "GET",
                    format!("/git/commits/{commit_sha}"),
                    404,
                    "Not Found".into(),
                )
            })
    }

    async fn create_tree(&self, base_tree: &str, path: &str, blob_sha: &str) -> Result<String> {
        if let Some(msg) = self.error_on_create_tree.lock().unwrap().clone() {
            return Err(Error::api("POST", "/git/trees", 422, msg));
        }
        self.create_tree_calls.lock().unwrap().push(CreateTreeCall {
            base_tree: base_tree.to_string(),
            path: path.to_string(),
            blob_sha: blob_sha.to_string(),
        });
        Ok(self.mint_sha("tree"))
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
        author: &CommitAuthor,
    ) -> Result<String> {
        self.create_commit_calls
            .lock()
            .unwrap()
            .push(CreateCommitCall {
                message: message.to_string(),
                tree_sha: tree_sha.to_string(),
                parent_sha: parent_sha.to_string(),
                author: author.clone(),
            });
        Ok(self.mint_sha("commit"))
    }

    async fn update_ref(&self, branch: &str, sha: &str) -> Result<()> {
        self.update_ref_calls
            .lock()
            .unwrap()
            .push((branch.to_string(), sha.to_string()));
        Ok(())
    }

    async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            title: title.to_string(),
            head: head.to_string(),
            base: base.to_string(),
            body: body.to_string(),
        });
        Ok(PullRequest {
            number: 1,
            html_url: "https://github.com/octo/repo/pull/1".to_string(),
        })
    }

    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<MergeResult> {
        if let Some(status) = *self.merge_error_status.lock().unwrap() {
            return Err(Error::api(
                "PUT",
                format!("/pulls/{number}/merge"),
                status,
                "Pull Request is not mergeable".into(),
            ));
        }
        self.merge_calls.lock().unwrap().push((number, method));
        let (merged, sha) = self.merge_response.lock().unwrap().clone();
        Ok(MergeResult { merged, sha })
    }

    async fn delete_ref(&self, branch: &str) -> Result<()> {
        if let Some(msg) = self.error_on_delete.lock().unwrap().clone() {
            return Err(Error::api(
                "DELETE",
                format!("/git/refs/heads/{branch}"),
                422,
                msg,
            ));
        }
        self.delete_calls.lock().unwrap().push(branch.to_string());
        Ok(())
    }

    fn config(&self) -> &ForgeConfig {
        &self.config
    }
}
