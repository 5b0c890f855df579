//! The single command: execute the workflow and print the summary

use crate::cli::style::Stylize;
use crate::cli::Cli;
use anstream::println;
use coauthor_pr::config::RunConfig;
use coauthor_pr::error::Result;
use coauthor_pr::forge::GitHubForge;
use coauthor_pr::types::RunSummary;
use coauthor_pr::workflow;

/// Resolve configuration, run the workflow, report the outcome
pub async fn run(args: Cli) -> Result<()> {
    let config = RunConfig::resolve(
        args.repo,
        args.username,
        args.host,
        args.base,
        args.merge_method,
        args.keep_branch,
    )?;

    let forge = GitHubForge::new(config.token, config.forge)?;
    let summary = workflow::run(&forge, &config.options).await?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} PR created: {}",
        "✅".success(),
        summary.pull_request.html_url.accent()
    );

    if summary.merge.merged {
        let sha = summary.merge.sha.as_deref().unwrap_or("(no sha)");
        println!(
            "{} PR merged with method={}. Merge SHA: {}",
            "✅".success(),
            summary.merge_method.emphasis(),
            sha.accent()
        );
        if summary.branch_deleted {
            println!("{} Deleted branch {}", "🧹", summary.branch.accent());
        } else {
            println!(
                "{} Branch {} was kept",
                "·".muted(),
                summary.branch.accent()
            );
        }
    } else {
        println!(
            "{} Could not merge PR automatically (likely branch protection/reviews/checks).",
            "⚠️".warn()
        );
        println!(
            "   You can review and merge manually at: {}",
            summary.pull_request.html_url.accent()
        );
    }

    println!(
        "{} Created file: {} with content: '{}'",
        "📄",
        summary.filename.accent(),
        summary.content.emphasis()
    );
}
