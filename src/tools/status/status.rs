//! Git status tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::parse_ahead_behind;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitStatusArgs {
    /// Machine-readable porcelain output
    #[serde(default)]
    pub porcelain: bool,
    /// One-line summary
    #[serde(default)]
    pub short: bool,
    /// Include branch and tracking information
    #[serde(default = "crate::tools::default_true")]
    pub branch: bool,
    /// Count stash entries
    #[serde(default = "crate::tools::default_true")]
    pub show_stash: bool,
}

/// Tool for inspecting the working tree
#[derive(Clone)]
pub struct GitStatusTool;

impl Tool for GitStatusTool {
    type Args = GitStatusArgs;

    fn name() -> &'static str {
        "git_status"
    }

    fn description() -> &'static str {
        "Show the working tree status: current branch, ahead/behind counts, \
         staged, unstaged, untracked and conflicted files, and stash count."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(status(ctx, args).await.or_failure("Failed to get repository status"))
    }
}

async fn status(ctx: &ToolContext, args: GitStatusArgs) -> Result<ToolResult, RunError> {
    let mut status = ctx.working_tree().await?;

    if args.branch {
        status.branch = ctx.current_branch().await?;

        // No upstream is not an error
        if let Ok(upstream) = ctx.git(&["rev-parse", "--abbrev-ref", "@{upstream}"]).await {
            let range = format!("{}...HEAD", upstream.trimmed());
            if let Ok(counts) = ctx.git(&["rev-list", "--left-right", "--count", range.as_str()]).await {
                (status.ahead, status.behind) = parse_ahead_behind(&counts.stdout);
            }
        }
    }

    let stash_count = if args.show_stash {
        ctx.git(&["stash", "list"])
            .await
            .map(|out| out.lines().count())
            .unwrap_or(0)
    } else {
        0
    };

    let formatted = if args.porcelain {
        status.format_porcelain()
    } else if args.short {
        status.format_short()
    } else {
        status.format_human(stash_count)
    };

    let message = if status.is_clean() {
        "Working tree clean".to_string()
    } else {
        format!("{} changes in working tree", status.change_count())
    };

    Ok(ToolResult::success(message).with_data(json!({
        "status": status,
        "formatted": formatted,
        "stashCount": stash_count,
    })))
}
