//! Git pull tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FastForward {
    /// Refuse anything but a fast-forward
    Only,
    /// Always create a merge commit
    No,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitPullArgs {
    /// Remote to pull from (defaults to the configured remote)
    #[serde(default)]
    pub remote: Option<String>,
    /// Branch to pull (defaults to the current branch)
    #[serde(default)]
    pub branch: Option<String>,
    /// Rebase instead of merging
    #[serde(default)]
    pub rebase: bool,
    /// Fast-forward behaviour
    #[serde(default)]
    pub ff: Option<FastForward>,
    /// Squash incoming commits
    #[serde(default)]
    pub squash: bool,
    /// Fetch tags as well
    #[serde(default)]
    pub tags: bool,
}

/// Tool for integrating remote changes
#[derive(Clone)]
pub struct GitPullTool;

impl Tool for GitPullTool {
    type Args = GitPullArgs;

    fn name() -> &'static str {
        "git_pull"
    }

    fn description() -> &'static str {
        "Fetch from a remote and integrate into the current branch by merge \
         or rebase."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(pull(ctx, args).await.or_failure("Failed to pull"))
    }
}

async fn pull(ctx: &ToolContext, args: GitPullArgs) -> Result<ToolResult, RunError> {
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| ctx.config().default_remote.clone());
    let branch = match args.branch.clone() {
        Some(branch) => branch,
        None => ctx.current_branch().await?,
    };

    let mut cmd = vec!["pull".to_string()];
    if args.rebase {
        cmd.push("--rebase".to_string());
    }
    match args.ff {
        Some(FastForward::Only) => cmd.push("--ff-only".to_string()),
        Some(FastForward::No) => cmd.push("--no-ff".to_string()),
        None => {}
    }
    if args.squash {
        cmd.push("--squash".to_string());
    }
    if args.tags {
        cmd.push("--tags".to_string());
    }
    cmd.extend([remote.clone(), branch.clone()]);

    let output = ctx.git(&cmd).await?;
    let up_to_date = output.stdout.contains("Already up to date");

    let message = if up_to_date {
        "Already up to date".to_string()
    } else {
        format!("Pulled from {remote}/{branch}")
    };
    Ok(ToolResult::success(message).with_data(json!({
        "remote": remote,
        "branch": branch,
        "rebase": args.rebase,
        "upToDate": up_to_date,
        "output": output.trimmed(),
    })))
}
