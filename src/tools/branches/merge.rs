//! Git merge tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::result::error_text;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    #[default]
    Recursive,
    Ort,
    Resolve,
    Octopus,
    Ours,
    Subtree,
}

impl MergeStrategy {
    fn as_str(self) -> &'static str {
        match self {
            MergeStrategy::Recursive => "recursive",
            MergeStrategy::Ort => "ort",
            MergeStrategy::Resolve => "resolve",
            MergeStrategy::Octopus => "octopus",
            MergeStrategy::Ours => "ours",
            MergeStrategy::Subtree => "subtree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MergeFastForward {
    /// Fail unless the merge is a fast-forward
    Only,
    /// Always create a merge commit
    No,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitMergeArgs {
    /// Branch to merge into the current branch
    #[serde(default)]
    pub branch: Option<String>,
    /// Merge strategy
    #[serde(default)]
    pub strategy: MergeStrategy,
    /// Fast-forward behaviour
    #[serde(default)]
    pub ff: Option<MergeFastForward>,
    /// Squash into a single change set
    #[serde(default)]
    pub squash: bool,
    /// Stop before creating the merge commit
    #[serde(default)]
    pub no_commit: bool,
    /// Merge commit message
    #[serde(default)]
    pub message: Option<String>,
    /// Abort an in-progress merge
    #[serde(default)]
    pub abort: bool,
    /// Continue after resolving conflicts
    #[serde(default, rename = "continue")]
    pub resume: bool,
}

/// Tool for merging branches
#[derive(Clone)]
pub struct GitMergeTool;

impl Tool for GitMergeTool {
    type Args = GitMergeArgs;

    fn name() -> &'static str {
        "git_merge"
    }

    fn description() -> &'static str {
        "Merge a branch into the current branch, or abort/continue an \
         in-progress merge. Conflicts are reported with the conflicted paths."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if args.abort {
            return Ok(control(ctx, "--abort", "Merge aborted")
                .await
                .or_failure("Failed to abort merge"));
        }
        if args.resume {
            return Ok(control(ctx, "--continue", "Merge continued")
                .await
                .or_failure("Failed to continue merge"));
        }
        let Some(branch) = args.branch.clone() else {
            return Ok(ToolResult::failure(
                "Branch is required unless aborting or continuing",
                "Missing branch",
            ));
        };

        let mut cmd = vec!["merge".to_string()];
        if args.strategy != MergeStrategy::Recursive {
            cmd.extend(["-s".to_string(), args.strategy.as_str().to_string()]);
        }
        match args.ff {
            Some(MergeFastForward::Only) => cmd.push("--ff-only".to_string()),
            Some(MergeFastForward::No) => cmd.push("--no-ff".to_string()),
            None => {}
        }
        if args.squash {
            cmd.push("--squash".to_string());
        }
        if args.no_commit {
            cmd.push("--no-commit".to_string());
        }
        if let Some(message) = &args.message {
            cmd.extend(["-m".to_string(), message.clone()]);
        }
        cmd.push(branch.clone());

        match ctx.git(&cmd).await {
            Ok(output) => {
                let fast_forward = output.stdout.contains("Fast-forward");
                Ok(ToolResult::success(format!("Merged '{branch}' into current branch")).with_data(json!({
                    "branch": branch,
                    "fastForward": fast_forward,
                    "squash": args.squash,
                    "output": output.trimmed(),
                })))
            }
            Err(e) => {
                let conflicts = ctx
                    .working_tree()
                    .await
                    .map(|tree| tree.conflicted)
                    .unwrap_or_default();
                if conflicts.is_empty() {
                    log::warn!("Merge of {branch} failed: {e}");
                    return Ok(ToolResult::failure(format!("Failed to merge '{branch}'"), error_text(&e)));
                }
                Ok(ToolResult::failure(
                    format!("Merge conflicts detected in {} files", conflicts.len()),
                    error_text(&e),
                )
                .with_data(json!({
                    "conflicts": conflicts,
                    "branch": branch,
                    "action": "resolve_conflicts",
                })))
            }
        }
    }
}

async fn control(ctx: &ToolContext, flag: &str, message: &str) -> Result<ToolResult, RunError> {
    ctx.git(&["merge", flag]).await?;
    Ok(ToolResult::success(message))
}
