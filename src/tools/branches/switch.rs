//! Git branch switching tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::looks_like_option;
use crate::result::error_text;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitBranchSwitchArgs {
    /// Branch to switch to
    pub name: String,
    /// Create the branch first
    #[serde(default)]
    pub create: bool,
    /// Discard local changes that would block the switch
    #[serde(default)]
    pub force: bool,
    /// Stash uncommitted changes before switching
    #[serde(default)]
    pub stash: bool,
    /// Track the start point (with `create`)
    #[serde(default)]
    pub track: bool,
    /// Start point for a created branch
    #[serde(default)]
    pub start_point: Option<String>,
}

/// Tool for checking out branches
#[derive(Clone)]
pub struct GitBranchSwitchTool;

impl Tool for GitBranchSwitchTool {
    type Args = GitBranchSwitchArgs;

    fn name() -> &'static str {
        "git_branch_switch"
    }

    fn description() -> &'static str {
        "Switch to another branch, optionally creating it or stashing \
         uncommitted changes first."
    }

    fn destructive() -> bool {
        true // force discards local changes
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if looks_like_option(&args.name) || args.start_point.as_deref().is_some_and(looks_like_option) {
            return Ok(ToolResult::failure(
                format!("Invalid branch name '{}'", args.name),
                "Branch names and start points must not start with '-'",
            ));
        }
        let name = args.name.clone();
        Ok(switch(ctx, args)
            .await
            .or_failure(format!("Failed to switch to branch '{name}'")))
    }
}

async fn switch(ctx: &ToolContext, args: GitBranchSwitchArgs) -> Result<ToolResult, RunError> {
    let mut stashed = false;
    if args.stash && !ctx.working_tree().await?.is_clean() {
        let note = format!("Auto-stash before switching to {}", args.name);
        ctx.git(&["stash", "push", "-m", note.as_str()]).await?;
        stashed = true;
        log::info!("Stashed local changes before switching to {}", args.name);
    }

    let mut cmd = vec!["checkout".to_string()];
    if args.create {
        cmd.push("-b".to_string());
    }
    if args.force {
        cmd.push("-f".to_string());
    }
    if args.create && args.track {
        cmd.push("--track".to_string());
    }
    cmd.push(args.name.clone());
    if args.create {
        if let Some(start) = &args.start_point {
            cmd.push(start.clone());
        }
    }

    if let Err(e) = ctx.git(&cmd).await {
        if !stashed {
            return Err(e);
        }
        log::warn!("Checkout of {} failed with local changes stashed: {e}", args.name);
        return Ok(ToolResult::failure(
            format!(
                "Failed to switch to branch '{}'. Your changes are saved in stash@{{0}}; run git_stash with action pop to restore them.",
                args.name
            ),
            error_text(&e),
        )
        .with_data(json!({
            "name": args.name,
            "stashed": true,
            "stashRef": "stash@{0}",
        })));
    }

    let mut message = format!("Switched to branch '{}'", args.name);
    if stashed {
        message.push_str(" (changes stashed)");
    }
    Ok(ToolResult::success(message).with_data(json!({
        "name": args.name,
        "created": args.create,
        "stashed": stashed,
        "track": args.track,
        "startPoint": args.start_point,
    })))
}
