//! Git show tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::{LOG_FORMAT, parse_log};
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

fn default_commit() -> String {
    "HEAD".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitShowArgs {
    /// Commit, tag or other revision to show
    #[serde(default = "default_commit")]
    pub commit: String,
    /// Include the patch
    #[serde(default = "crate::tools::default_true")]
    pub show_diff: bool,
    /// Only list changed file names
    #[serde(default)]
    pub name_only: bool,
    /// Include a diffstat
    #[serde(default)]
    pub stat: bool,
}

/// Tool for showing a single commit
#[derive(Clone)]
pub struct GitShowTool;

impl Tool for GitShowTool {
    type Args = GitShowArgs;

    fn name() -> &'static str {
        "git_show"
    }

    fn description() -> &'static str {
        "Show a commit's metadata and, optionally, its changes."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let commit = args.commit.clone();
        Ok(show(ctx, args)
            .await
            .or_failure(format!("Failed to show {commit}")))
    }
}

async fn show(ctx: &ToolContext, args: GitShowArgs) -> Result<ToolResult, RunError> {
    let mut cmd = vec!["show".to_string()];
    if !args.show_diff {
        cmd.push("--no-patch".to_string());
    }
    if args.name_only {
        cmd.push("--name-only".to_string());
    }
    if args.stat {
        cmd.push("--stat".to_string());
    }
    cmd.push(args.commit.clone());

    let raw = ctx.git(&cmd).await?;

    let meta = ctx
        .git(&["show", "--no-patch", LOG_FORMAT, args.commit.as_str()])
        .await?;
    let info = parse_log(&meta.stdout).into_iter().next();

    Ok(ToolResult::success(format!("Showing {}", args.commit)).with_data(json!({
        "raw": raw.stdout,
        "commit": info,
    })))
}
