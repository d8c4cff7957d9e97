//! Git fetch tool

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitFetchArgs {
    /// Remote to fetch from (defaults to the configured remote)
    #[serde(default)]
    pub remote: Option<String>,
    /// Single branch to fetch
    #[serde(default)]
    pub branch: Option<String>,
    /// Fetch every remote
    #[serde(default)]
    pub all: bool,
    /// Fetch tags
    #[serde(default = "crate::tools::default_true")]
    pub tags: bool,
    /// Remove remote-tracking refs that no longer exist
    #[serde(default)]
    pub prune: bool,
    /// Limit history depth
    #[serde(default)]
    pub depth: Option<u32>,
    /// Allow non-fast-forward ref updates
    #[serde(default)]
    pub force: bool,
    /// Show what would be fetched
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for downloading remote refs and objects
#[derive(Clone)]
pub struct GitFetchTool;

impl Tool for GitFetchTool {
    type Args = GitFetchArgs;

    fn name() -> &'static str {
        "git_fetch"
    }

    fn description() -> &'static str {
        "Fetch branches and tags from one or all remotes and report which \
         remote branches are new or updated."
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(fetch(ctx, args).await.or_failure("Failed to fetch"))
    }
}

/// Remote-tracking branches mapped to their object ids.
async fn remote_branches(ctx: &ToolContext) -> BTreeMap<String, String> {
    let output = ctx
        .git(&["for-each-ref", "--format=%(refname:short) %(objectname)", "refs/remotes"])
        .await
        .unwrap_or_default();
    output
        .lines()
        .filter_map(|line| line.split_once(' '))
        .filter(|(name, _)| !name.ends_with("/HEAD"))
        .map(|(name, id)| (name.to_string(), id.trim().to_string()))
        .collect()
}

async fn fetch(ctx: &ToolContext, args: GitFetchArgs) -> Result<ToolResult, RunError> {
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| ctx.config().default_remote.clone());

    let mut cmd = vec!["fetch".to_string()];
    if args.dry_run {
        cmd.push("--dry-run".to_string());
    }
    if args.force {
        cmd.push("--force".to_string());
    }
    if args.prune {
        cmd.push("--prune".to_string());
    }
    if args.tags {
        cmd.push("--tags".to_string());
    }
    if let Some(depth) = args.depth {
        cmd.push(format!("--depth={depth}"));
    }
    if args.all {
        cmd.push("--all".to_string());
    } else {
        cmd.push(remote.clone());
        if let Some(branch) = &args.branch {
            cmd.push(branch.clone());
        }
    }

    let before = remote_branches(ctx).await;
    let output = ctx.git(&cmd).await?;
    let after = remote_branches(ctx).await;

    let new_branches: Vec<&String> = after.keys().filter(|name| !before.contains_key(*name)).collect();
    let updated_branches: Vec<&String> = after
        .iter()
        .filter(|(name, id)| before.get(*name).is_some_and(|old| old != *id))
        .map(|(name, _)| name)
        .collect();

    let (source, fetched_remote) = if args.all {
        ("all remotes".to_string(), None)
    } else {
        (remote.clone(), Some(remote))
    };
    let data = json!({
        "remote": fetched_remote,
        "branch": args.branch,
        "newBranches": new_branches,
        "updatedBranches": updated_branches,
        // fetch reports on stderr
        "output": output.stderr.trim(),
    });

    if args.dry_run {
        return Ok(ToolResult::preview(format!("Would fetch from {source}"), data));
    }
    Ok(ToolResult::success(format!(
        "Fetched from {source}: {} new, {} updated branches",
        new_branches.len(),
        updated_branches.len()
    ))
    .with_data(data))
}
