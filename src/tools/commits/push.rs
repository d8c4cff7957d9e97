//! Git push tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitPushArgs {
    /// Remote to push to (defaults to the configured remote)
    #[serde(default)]
    pub remote: Option<String>,
    /// Branch to push (defaults to the current branch)
    #[serde(default)]
    pub branch: Option<String>,
    /// Set the upstream of the branch
    #[serde(default)]
    pub set_upstream: bool,
    /// Overwrite the remote branch
    #[serde(default)]
    pub force: bool,
    /// Overwrite only if the remote has not moved
    #[serde(default)]
    pub force_with_lease: bool,
    /// Push tags as well
    #[serde(default)]
    pub tags: bool,
    /// Report what would be pushed
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for publishing commits to a remote
#[derive(Clone)]
pub struct GitPushTool;

impl Tool for GitPushTool {
    type Args = GitPushArgs;

    fn name() -> &'static str {
        "git_push"
    }

    fn description() -> &'static str {
        "Push a branch to a remote. Supports setting the upstream, force or \
         force-with-lease, pushing tags, and dry runs."
    }

    fn destructive() -> bool {
        true // Force pushes rewrite remote history
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(push(ctx, args).await.or_failure("Failed to push"))
    }
}

async fn push(ctx: &ToolContext, args: GitPushArgs) -> Result<ToolResult, RunError> {
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| ctx.config().default_remote.clone());
    let branch = match args.branch.clone() {
        Some(branch) => branch,
        None => ctx.current_branch().await?,
    };

    let mut cmd = vec!["push".to_string()];
    if args.dry_run {
        cmd.push("--dry-run".to_string());
    }
    if args.set_upstream {
        cmd.push("-u".to_string());
    }
    if args.force_with_lease {
        cmd.push("--force-with-lease".to_string());
    } else if args.force {
        cmd.push("--force".to_string());
    }
    if args.tags {
        cmd.push("--tags".to_string());
    }
    cmd.extend([remote.clone(), branch.clone()]);

    let output = ctx.git(&cmd).await?;
    // git reports push progress on stderr
    let details = format!("{}{}", output.stdout, output.stderr);

    let data = json!({
        "remote": remote,
        "branch": branch,
        "setUpstream": args.set_upstream,
        "force": args.force || args.force_with_lease,
        "tags": args.tags,
        "output": details.trim(),
    });

    if args.dry_run {
        return Ok(ToolResult::preview(format!("Would push to {remote}/{branch}"), data));
    }
    Ok(ToolResult::success(format!("Pushed to {remote}/{branch}")).with_data(data))
}
