//! Git branch listing tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::{BRANCH_FORMAT, parse_branches};
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitBranchListArgs {
    /// List remote-tracking branches only
    #[serde(default)]
    pub include_remote: bool,
    /// List local and remote-tracking branches
    #[serde(default)]
    pub all: bool,
    /// Include upstream, tracking counts and last commit subject
    #[serde(default)]
    pub verbose: bool,
    /// Only branches merged into this commit
    #[serde(default)]
    pub merged: Option<String>,
    /// Only branches not merged into this commit
    #[serde(default)]
    pub no_merged: Option<String>,
}

/// Tool for listing branches
#[derive(Clone)]
pub struct GitBranchListTool;

impl Tool for GitBranchListTool {
    type Args = GitBranchListArgs;

    fn name() -> &'static str {
        "git_branch_list"
    }

    fn description() -> &'static str {
        "List local and/or remote branches with the current branch marked and \
         ahead/behind counts against each upstream."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(list(ctx, args).await.or_failure("Failed to list branches"))
    }
}

async fn list(ctx: &ToolContext, args: GitBranchListArgs) -> Result<ToolResult, RunError> {
    let mut cmd = vec!["branch".to_string(), BRANCH_FORMAT.to_string()];
    if args.all {
        cmd.push("-a".to_string());
    } else if args.include_remote {
        cmd.push("-r".to_string());
    }
    if let Some(commit) = &args.merged {
        cmd.push(format!("--merged={commit}"));
    }
    if let Some(commit) = &args.no_merged {
        cmd.push(format!("--no-merged={commit}"));
    }

    let output = ctx.git(&cmd).await?;
    let branches = parse_branches(&output.stdout);
    let current = branches.iter().find(|b| b.current).map(|b| b.name.clone());

    let branches: Vec<_> = if args.verbose {
        branches.iter().map(|b| json!(b)).collect()
    } else {
        branches
            .iter()
            .map(|b| {
                json!({
                    "name": b.name,
                    "current": b.current,
                    "remote": b.remote,
                    "ahead": b.ahead,
                    "behind": b.behind,
                })
            })
            .collect()
    };

    Ok(ToolResult::success(format!("Found {} branches", branches.len())).with_data(json!({
        "branches": branches,
        "current": current,
        "total": branches.len(),
    })))
}
