//! Git add tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitAddArgs {
    /// Paths to stage (defaults to `.`)
    #[serde(default)]
    pub files: Vec<String>,
    /// Stage every change, including deletions and untracked files
    #[serde(default)]
    pub all: bool,
    /// Stage modifications and deletions of tracked files only
    #[serde(default)]
    pub update: bool,
    /// Report what would be staged without staging
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for staging changes
#[derive(Clone)]
pub struct GitAddTool;

impl Tool for GitAddTool {
    type Args = GitAddArgs;

    fn name() -> &'static str {
        "git_add"
    }

    fn description() -> &'static str {
        "Stage files for the next commit. Supports staging everything, tracked \
         files only, or a dry run listing what would be staged."
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(add(ctx, args).await.or_failure("Failed to stage files"))
    }
}

async fn add(ctx: &ToolContext, args: GitAddArgs) -> Result<ToolResult, RunError> {
    let mut cmd = vec!["add".to_string()];
    if args.dry_run {
        cmd.push("--dry-run".to_string());
    }
    if args.all {
        cmd.push("-A".to_string());
    }
    if args.update {
        cmd.push("-u".to_string());
    }
    if args.files.is_empty() {
        cmd.push(".".to_string());
    } else {
        cmd.extend(args.files.iter().cloned());
    }
    let command = format!("git {}", cmd.join(" "));

    let output = ctx.git(&cmd).await?;

    if args.dry_run {
        // Lines look like `add 'path'`
        let would_stage: Vec<String> = output
            .lines()
            .map(|line| {
                line.trim_start_matches("add ")
                    .trim_start_matches("remove ")
                    .trim_matches('\'')
                    .to_string()
            })
            .collect();
        return Ok(ToolResult::preview(
            format!("Would stage {} files", would_stage.len()),
            json!({ "staged": would_stage, "command": command }),
        ));
    }

    let staged = ctx.working_tree().await?.staged;
    Ok(ToolResult::success(format!("Staged {} files", staged.len())).with_data(json!({
        "staged": staged,
        "command": command,
        "dryRun": false,
    })))
}
