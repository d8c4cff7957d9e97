//! Git revert tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::result::error_text;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitRevertArgs {
    /// Commits to revert, newest first
    #[serde(default)]
    pub commits: Vec<String>,
    /// Apply the inverse changes without committing
    #[serde(default)]
    pub no_commit: bool,
    /// Parent number to revert a merge commit against
    #[serde(default)]
    pub mainline: Option<u32>,
    /// Add a Signed-off-by trailer
    #[serde(default)]
    pub signoff: bool,
    /// Continue after resolving conflicts
    #[serde(default, rename = "continue")]
    pub resume: bool,
    /// Abort an in-progress revert
    #[serde(default)]
    pub abort: bool,
}

/// Tool for undoing commits with new commits
#[derive(Clone)]
pub struct GitRevertTool;

impl Tool for GitRevertTool {
    type Args = GitRevertArgs;

    fn name() -> &'static str {
        "git_revert"
    }

    fn description() -> &'static str {
        "Create commits that undo earlier commits, or continue/abort an \
         in-progress revert."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if args.abort {
            return Ok(control(ctx, "--abort", "Revert aborted")
                .await
                .or_failure("Failed to abort revert"));
        }
        if args.resume {
            return Ok(control(ctx, "--continue", "Revert continued")
                .await
                .or_failure("Failed to continue revert"));
        }
        if args.commits.is_empty() {
            return Ok(ToolResult::failure("At least one commit is required", "Missing commits"));
        }

        let mut cmd = vec!["revert".to_string()];
        if args.no_commit {
            cmd.push("--no-commit".to_string());
        } else {
            cmd.push("--no-edit".to_string());
        }
        if args.signoff {
            cmd.push("--signoff".to_string());
        }
        if let Some(parent) = args.mainline {
            cmd.extend(["--mainline".to_string(), parent.to_string()]);
        }
        cmd.extend(args.commits.iter().cloned());

        match ctx.git(&cmd).await {
            Ok(_) => Ok(ToolResult::success(format!("Reverted {} commits", args.commits.len())).with_data(
                json!({
                    "commits": args.commits,
                    "committed": !args.no_commit,
                }),
            )),
            Err(e) => {
                let conflicts = ctx
                    .working_tree()
                    .await
                    .map(|tree| tree.conflicted)
                    .unwrap_or_default();
                if conflicts.is_empty() {
                    return Ok(ToolResult::failure("Failed to revert", error_text(&e)));
                }
                Ok(ToolResult::failure(
                    format!("Revert conflicts detected in {} files", conflicts.len()),
                    error_text(&e),
                )
                .with_data(json!({
                    "conflicts": conflicts,
                    "commits": args.commits,
                    "nextSteps": [
                        "Resolve the conflicts in the listed files",
                        "Stage the resolved files with git_add",
                        "Run git_revert with continue=true, or abort=true to give up",
                    ],
                })))
            }
        }
    }
}

async fn control(ctx: &ToolContext, flag: &str, message: &str) -> Result<ToolResult, RunError> {
    ctx.git(&["revert", flag]).await?;
    Ok(ToolResult::success(message))
}
