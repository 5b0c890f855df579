//! GitHub forge implementation over the REST v3 API
//!
//! Every call is raw HTTP with typed payloads; the git data endpoints
//! (blobs, trees, commits, refs) have no high-level client coverage.

use crate::error::{Error, Result};
use crate::forge::ForgeService;
use crate::types::{
    CommitAuthor, ForgeConfig, Identity, MergeMethod, MergeResult, PullRequest,
};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

// Response payloads (only the fields we depend on)

#[derive(Deserialize)]
struct User {
    login: String,
    id: u64,
}

#[derive(Deserialize)]
struct GitRef {
    object: RefObject,
}

#[derive(Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Deserialize)]
struct ObjectSha {
    sha: String,
}

#[derive(Deserialize)]
struct GitCommit {
    tree: ObjectSha,
}

#[derive(Deserialize)]
struct PrResponse {
    number: u64,
    html_url: String,
}

#[derive(Deserialize)]
struct MergeResponse {
    #[serde(default)]
    merged: bool,
    sha: Option<String>,
}

// Request payloads

#[derive(Serialize)]
struct CreateRefPayload<'a> {
    #[serde(rename = "ref")]
    git_ref: String,
    sha: &'a str,
}

#[derive(Serialize)]
struct CreateBlobPayload {
    content: String,
    encoding: &'static str,
}

#[derive(Serialize)]
struct CreateTreePayload<'a> {
    base_tree: &'a str,
    tree: Vec<TreeEntry<'a>>,
}

#[derive(Serialize)]
struct TreeEntry<'a> {
    path: &'a str,
    mode: &'static str,
    #[serde(rename = "type")]
    entry_type: &'static str,
    sha: &'a str,
}

#[derive(Serialize)]
struct GitSignature<'a> {
    name: &'a str,
    email: &'a str,
    date: String,
}

impl<'a> GitSignature<'a> {
    fn from_author(author: &'a CommitAuthor) -> Self {
        Self {
            name: &author.name,
            email: &author.email,
            date: author.date.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        }
    }
}

#[derive(Serialize)]
struct CreateCommitPayload<'a> {
    message: &'a str,
    tree: &'a str,
    parents: Vec<&'a str>,
    author: GitSignature<'a>,
    committer: GitSignature<'a>,
}

#[derive(Serialize)]
struct CreatePrPayload<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct MergePayload {
    merge_method: String,
}

/// GitHub service using reqwest
pub struct GitHubForge {
    client: Client,
    token: String,
    api_base: String,
    config: ForgeConfig,
}

impl GitHubForge {
    /// Create a new GitHub forge for github.com or an enterprise host
    pub fn new(token: String, config: ForgeConfig) -> Result<Self> {
        let api_base = match config.host {
            Some(ref h) => format!("https://{h}/api/v3"),
            None => "https://api.github.com".to_string(),
        };
        Self::with_api_base(token, config, api_base)
    }

    /// Create a forge against an explicit API base URL
    pub fn with_api_base(token: String, config: ForgeConfig, api_base: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("coauthor-pr")
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            token,
            api_base,
            config,
        })
    }

    fn repo_path(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{suffix}", self.config.owner, self.config.repo)
    }

    /// Issue a request and fail on any status >= 300
    ///
    /// All writes share this strictness; the merge call is intentionally
    /// not special-cased, so a branch-protection rejection aborts the run.
    async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        method_name: &'static str,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = format!("{}{path}", self.api_base);
        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        if status >= 300 {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(method_name, path, status, body));
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .send::<()>(Method::GET, "GET", path, None)
            .await?;
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize + Sync, T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        method_name: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(method, method_name, path, Some(body)).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ForgeService for GitHubForge {
    async fn authenticated_user(&self) -> Result<Identity> {
        debug!("resolving authenticated user");
        let user: User = self.get_json("/user").await?;
        debug!(login = %user.login, id = user.id, "resolved authenticated user");
        Ok(Identity {
            login: user.login,
            id: user.id,
        })
    }

    async fn user(&self, login: &str) -> Result<Identity> {
        debug!(login, "resolving user");
        let user: User = self.get_json(&format!("/users/{login}")).await?;
        debug!(login = %user.login, id = user.id, "resolved user");
        Ok(Identity {
            login: user.login,
            id: user.id,
        })
    }

    async fn branch_sha(&self, branch: &str) -> Result<String> {
        debug!(branch, "reading branch ref");
        let git_ref: GitRef = self
            .get_json(&self.repo_path(&format!("/git/ref/heads/{branch}")))
            .await?;
        debug!(branch, sha = %git_ref.object.sha, "read branch ref");
        Ok(git_ref.object.sha)
    }

    async fn create_ref(&self, branch: &str, sha: &str) -> Result<()> {
        debug!(branch, sha, "creating ref");
        let payload = CreateRefPayload {
            git_ref: format!("refs/heads/{branch}"),
            sha,
        };
        self.send(
            Method::POST,
            "POST",
            &self.repo_path("/git/refs"),
            Some(&payload),
        )
        .await?;
        debug!(branch, "created ref");
        Ok(())
    }

    async fn create_blob(&self, content: &[u8]) -> Result<String> {
        debug!(len = content.len(), "creating blob");
        let payload = CreateBlobPayload {
            content: BASE64.encode(content),
            encoding: "base64",
        };
        let blob: ObjectSha = self
            .send_json(
                Method::POST,
                "POST",
                &self.repo_path("/git/blobs"),
                &payload,
            )
            .await?;
        debug!(sha = %blob.sha, "created blob");
        Ok(blob.sha)
    }

    async fn commit_tree_sha(&self, commit_sha: &str) -> Result<String> {
        debug!(commit_sha, "reading commit tree");
        let commit: GitCommit = self
            .get_json(&self.repo_path(&format!("/git/commits/{commit_sha}")))
            .await?;
        debug!(tree_sha = %commit.tree.sha, "read commit tree");
        Ok(commit.tree.sha)
    }

    async fn create_tree(&self, base_tree: &str, path: &str, blob_sha: &str) -> Result<String> {
        debug!(base_tree, path, "creating tree");
        let payload = CreateTreePayload {
            base_tree,
            tree: vec![TreeEntry {
                path,
                mode: "100644",
                entry_type: "blob",
                sha: blob_sha,
            }],
        };
        let tree: ObjectSha = self
            .send_json(
                Method::POST,
                "POST",
                &self.repo_path("/git/trees"),
                &payload,
            )
            .await?;
        debug!(sha = %tree.sha, "created tree");
        Ok(tree.sha)
    }

    async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
        author: &CommitAuthor,
    ) -> Result<String> {
        debug!(tree_sha, parent_sha, "creating commit");
        let payload = CreateCommitPayload {
            message,
            tree: tree_sha,
            parents: vec![parent_sha],
            author: GitSignature::from_author(author),
            committer: GitSignature::from_author(author),
        };
        let commit: ObjectSha = self
            .send_json(
                Method::POST,
                "POST",
                &self.repo_path("/git/commits"),
                &payload,
            )
            .await?;
        debug!(sha = %commit.sha, "created commit");
        Ok(commit.sha)
    }

    async fn update_ref(&self, branch: &str, sha: &str) -> Result<()> {
        debug!(branch, sha, "updating ref");
        self.send(
            Method::PATCH,
            "PATCH",
            &self.repo_path(&format!("/git/refs/heads/{branch}")),
            Some(&serde_json::json!({ "sha": sha })),
        )
        .await?;
        debug!(branch, "updated ref");
        Ok(())
    }

    async fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(head, base, "creating PR");
        let payload = CreatePrPayload {
            title,
            head,
            base,
            body,
        };
        let pr: PrResponse = self
            .send_json(Method::POST, "POST", &self.repo_path("/pulls"), &payload)
            .await?;
        debug!(pr_number = pr.number, "created PR");
        Ok(PullRequest {
            number: pr.number,
            html_url: pr.html_url,
        })
    }

    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number = number, %method, "merging PR");
        let payload = MergePayload {
            merge_method: method.to_string(),
        };
        let merge: MergeResponse = self
            .send_json(
                Method::PUT,
                "PUT",
                &self.repo_path(&format!("/pulls/{number}/merge")),
                &payload,
            )
            .await?;
        debug!(pr_number = number, merged = merge.merged, sha = ?merge.sha, "merge complete");
        Ok(MergeResult {
            merged: merge.merged,
            sha: merge.sha,
        })
    }

    async fn delete_ref(&self, branch: &str) -> Result<()> {
        debug!(branch, "deleting ref");
        self.send::<()>(
            Method::DELETE,
            "DELETE",
            &self.repo_path(&format!("/git/refs/heads/{branch}")),
            None,
        )
        .await?;
        debug!(branch, "deleted ref");
        Ok(())
    }

    fn config(&self) -> &ForgeConfig {
        &self.config
    }
}
