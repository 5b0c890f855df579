//! The one-shot run: branch, co-authored commit, PR, merge, cleanup
//!
//! A straight-line sequence of forge calls. Every step propagates the first
//! error; there is no retry and no rollback, so a failure after branch
//! creation leaves the branch orphaned on the forge. Branch deletion after
//! a successful merge is the only non-fatal step.

use crate::config::RunOptions;
use crate::error::Result;
use crate::forge::ForgeService;
use crate::types::{CommitAuthor, RunSummary};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng as _;
use tracing::{debug, warn};

/// Length of the random file content
const CONTENT_LEN: usize = 5;

/// Execute the workflow against a forge
///
/// Pure of environment: everything it needs arrives through `options` and
/// the forge service, so tests can drive it with a fake.
pub async fn run(forge: &dyn ForgeService, options: &RunOptions) -> Result<RunSummary> {
    let domain = forge.config().noreply_domain().to_string();

    // Resolve both identities up front; emails are always synthesized.
    let actor = forge.authenticated_user().await?;
    let coauthor = forge.user(&options.coauthor).await?;
    let actor_email = actor.noreply_email(&domain);
    let coauthor_email = coauthor.noreply_email(&domain);

    let base_sha = forge.branch_sha(&options.base_branch).await?;

    // Second-resolution timestamp: collision-prone under concurrent runs,
    // accepted for a one-shot action.
    let now = Utc::now();
    let branch = branch_name(now);
    forge.create_ref(&branch, &base_sha).await?;
    debug!(%branch, %base_sha, "branched off base");

    // The file is named after the requested username as given, while the
    // trailer uses the login as the forge resolved it.
    let filename = format!("{}.txt", options.coauthor);
    let content = random_content(CONTENT_LEN);
    let blob_sha = forge.create_blob(content.as_bytes()).await?;

    let base_tree = forge.commit_tree_sha(&base_sha).await?;
    let tree_sha = forge.create_tree(&base_tree, &filename, &blob_sha).await?;

    let message = commit_message(&filename, &coauthor.login, &coauthor_email);
    let author = CommitAuthor {
        name: actor.login.clone(),
        email: actor_email,
        date: now,
    };
    let commit_sha = forge
        .create_commit(&message, &tree_sha, &base_sha, &author)
        .await?;

    forge.update_ref(&branch, &commit_sha).await?;
    debug!(%branch, %commit_sha, "advanced branch to new commit");

    let title = format!("Add {filename}");
    let body = pr_body(&filename, &coauthor.login, &coauthor_email);
    let pull_request = forge
        .create_pull_request(&title, &branch, &options.base_branch, &body)
        .await?;

    // Any rejecting status (branch protection, required checks) errors out
    // of this call; merged == false only arrives on a 2xx response.
    let merge = forge
        .merge_pull_request(pull_request.number, options.merge_method)
        .await?;

    let mut branch_deleted = false;
    if merge.merged && options.delete_branch {
        match forge.delete_ref(&branch).await {
            Ok(()) => branch_deleted = true,
            Err(e) => warn!(%branch, error = %e, "could not delete branch after merge"),
        }
    }

    Ok(RunSummary {
        branch,
        filename,
        content,
        pull_request,
        merge_method: options.merge_method,
        merge,
        branch_deleted,
    })
}

/// Branch name derived from a UTC timestamp at second resolution
pub fn branch_name(now: DateTime<Utc>) -> String {
    format!("auto-pr-{}", now.format("%Y%m%d%H%M%S"))
}

/// Random alphanumeric content from the OS entropy source
pub fn random_content(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// The co-authorship trailer embedded in the commit message and PR body
pub fn coauthor_trailer(login: &str, email: &str) -> String {
    format!("Co-authored-by: {login} <{email}>")
}

fn commit_message(filename: &str, login: &str, email: &str) -> String {
    format!("Add {filename}\n\n{}", coauthor_trailer(login, email))
}

fn pr_body(filename: &str, login: &str, email: &str) -> String {
    format!(
        "This PR adds `{filename}` with random content.\n\n{}",
        coauthor_trailer(login, email)
    )
}
