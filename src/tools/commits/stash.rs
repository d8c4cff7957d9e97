//! Git stash tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StashAction {
    Push,
    Pop,
    Apply,
    List,
    Show,
    Drop,
    Clear,
}

impl StashAction {
    fn as_str(self) -> &'static str {
        match self {
            StashAction::Push => "push",
            StashAction::Pop => "pop",
            StashAction::Apply => "apply",
            StashAction::List => "list",
            StashAction::Show => "show",
            StashAction::Drop => "drop",
            StashAction::Clear => "clear",
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitStashArgs {
    /// Operation to perform
    pub action: StashAction,
    /// Description for a new stash
    #[serde(default)]
    pub message: Option<String>,
    /// Stash untracked files too
    #[serde(default)]
    pub include_untracked: bool,
    /// Leave staged changes in the index
    #[serde(default)]
    pub keep_index: bool,
    /// Stash entry for pop, apply, show and drop
    #[serde(default)]
    pub stash_index: u32,
}

/// Tool for shelving and restoring work in progress
#[derive(Clone)]
pub struct GitStashTool;

impl Tool for GitStashTool {
    type Args = GitStashArgs;

    fn name() -> &'static str {
        "git_stash"
    }

    fn description() -> &'static str {
        "Stash uncommitted changes and manage stash entries: push, pop, \
         apply, list, show, drop, clear."
    }

    fn destructive() -> bool {
        true // drop and clear discard entries
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let action = args.action.as_str();
        Ok(stash(ctx, args)
            .await
            .or_failure(format!("Failed to {action} stash")))
    }
}

async fn stash(ctx: &ToolContext, args: GitStashArgs) -> Result<ToolResult, RunError> {
    let entry = format!("stash@{{{}}}", args.stash_index);
    let mut cmd = vec!["stash".to_string(), args.action.as_str().to_string()];

    match args.action {
        StashAction::Push => {
            if let Some(message) = &args.message {
                cmd.extend(["-m".to_string(), message.clone()]);
            }
            if args.include_untracked {
                cmd.push("-u".to_string());
            }
            if args.keep_index {
                cmd.push("--keep-index".to_string());
            }
        }
        StashAction::Pop | StashAction::Apply | StashAction::Show | StashAction::Drop => {
            cmd.push(entry.clone());
        }
        StashAction::List | StashAction::Clear => {}
    }

    let output = ctx.git(&cmd).await?;

    let mut data = json!({
        "action": args.action.as_str(),
        "output": output.trimmed(),
    });
    match args.action {
        StashAction::List => {
            let entries: Vec<&str> = output.lines().collect();
            data["count"] = json!(entries.len());
            data["stashes"] = json!(entries);
        }
        StashAction::Push => {
            data["message"] = json!(args.message);
        }
        StashAction::Clear => {}
        _ => data["stash"] = json!(entry),
    }

    Ok(ToolResult::success(format!("Stash {} completed", args.action.as_str())).with_data(data))
}
