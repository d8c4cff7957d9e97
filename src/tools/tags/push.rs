//! Git tag push tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitTagPushArgs {
    /// Remote to push to (defaults to the configured remote)
    #[serde(default)]
    pub remote: Option<String>,
    /// Tags to push; all tags when empty
    #[serde(default)]
    pub tags: Vec<String>,
    /// Push every tag
    #[serde(default)]
    pub all: bool,
    /// Overwrite tags on the remote
    #[serde(default)]
    pub force: bool,
    /// Delete the tags from the remote instead
    #[serde(default)]
    pub delete: bool,
    /// Report what would be pushed
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for publishing or removing tags on a remote
#[derive(Clone)]
pub struct GitTagPushTool;

impl Tool for GitTagPushTool {
    type Args = GitTagPushArgs;

    fn name() -> &'static str {
        "git_tag_push"
    }

    fn description() -> &'static str {
        "Push tags to a remote, or delete them from the remote."
    }

    fn destructive() -> bool {
        true // delete and force change remote tags
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if args.delete && args.tags.is_empty() {
            return Ok(ToolResult::failure(
                "Tags must be specified for deletion",
                "Missing tags",
            ));
        }
        Ok(push(ctx, args).await.or_failure("Failed to push tags"))
    }
}

async fn push(ctx: &ToolContext, args: GitTagPushArgs) -> Result<ToolResult, RunError> {
    let remote = args
        .remote
        .clone()
        .unwrap_or_else(|| ctx.config().default_remote.clone());

    let mut cmd = vec!["push".to_string()];
    if args.dry_run {
        cmd.push("--dry-run".to_string());
    }
    if args.force {
        cmd.push("--force".to_string());
    }
    cmd.push(remote.clone());

    if args.delete {
        cmd.extend(args.tags.iter().map(|t| format!(":refs/tags/{t}")));
    } else if args.all || args.tags.is_empty() {
        cmd.push("--tags".to_string());
    } else {
        cmd.extend(args.tags.iter().map(|t| format!("refs/tags/{t}:refs/tags/{t}")));
    }

    let output = ctx.git(&cmd).await?;

    let pushed: Vec<&str> = if args.tags.is_empty() {
        vec!["all"]
    } else {
        args.tags.iter().map(String::as_str).collect()
    };
    let data = json!({
        "remote": remote,
        "tags": pushed,
        "deleted": args.delete,
        "force": args.force,
        "output": format!("{}{}", output.stdout, output.stderr).trim(),
    });

    let direction = if args.delete { "deleted from" } else { "pushed to" };
    if args.dry_run {
        let verb = if args.delete { "delete from" } else { "push to" };
        return Ok(ToolResult::preview(format!("Would {verb} {remote}"), data));
    }
    Ok(ToolResult::success(format!("Tags {direction} remote successfully")).with_data(data))
}
