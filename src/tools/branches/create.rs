//! Git branch creation tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::looks_like_option;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitBranchCreateArgs {
    /// Name of the new branch
    pub name: String,
    /// Commit or branch to start from (defaults to HEAD)
    #[serde(default)]
    pub start_point: Option<String>,
    /// Check out the branch after creating it
    #[serde(default = "crate::tools::default_true")]
    pub checkout: bool,
    /// Set up tracking against the start point
    #[serde(default)]
    pub track: bool,
    /// Reset the branch if it already exists
    #[serde(default)]
    pub force: bool,
}

/// Tool for creating branches
#[derive(Clone)]
pub struct GitBranchCreateTool;

impl Tool for GitBranchCreateTool {
    type Args = GitBranchCreateArgs;

    fn name() -> &'static str {
        "git_branch_create"
    }

    fn description() -> &'static str {
        "Create a new branch from HEAD or a start point and optionally check it out."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if looks_like_option(&args.name) || args.name.trim().is_empty() {
            return Ok(ToolResult::failure(
                format!("Invalid branch name '{}'", args.name),
                "Branch names must not be empty or start with '-'",
            ));
        }
        if args.start_point.as_deref().is_some_and(looks_like_option) {
            return Ok(ToolResult::failure(
                "Start point must be a revision, not an option",
                "Invalid start point",
            ));
        }
        let name = args.name.clone();
        Ok(create(ctx, args)
            .await
            .or_failure(format!("Failed to create branch '{name}'")))
    }
}

async fn create(ctx: &ToolContext, args: GitBranchCreateArgs) -> Result<ToolResult, RunError> {
    let mut cmd = vec!["branch".to_string()];
    if args.force {
        cmd.push("-f".to_string());
    }
    if args.track {
        cmd.push("--track".to_string());
    }
    cmd.push(args.name.clone());
    if let Some(start) = &args.start_point {
        cmd.push(start.clone());
    }

    ctx.git(&cmd).await?;
    if args.checkout {
        ctx.git(&["checkout", args.name.as_str()]).await?;
    }

    let message = if args.checkout {
        format!("Branch '{}' created and checked out", args.name)
    } else {
        format!("Branch '{}' created", args.name)
    };
    Ok(ToolResult::success(message).with_data(json!({
        "name": args.name,
        "startPoint": args.start_point,
        "checkedOut": args.checkout,
        "track": args.track,
    })))
}
