//! Git tag creation tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::{is_valid_tag_name, looks_like_option};
use crate::{Gate, Hazard, OrFailure, RunError, SafetyGate, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitTagArgs {
    /// Tag name
    pub name: String,
    /// Annotation message; implies an annotated tag
    #[serde(default)]
    pub message: Option<String>,
    /// Commit to tag (defaults to HEAD)
    #[serde(default)]
    pub commit: Option<String>,
    /// Replace an existing tag
    #[serde(default)]
    pub force: bool,
    /// Create a GPG-signed tag
    #[serde(default)]
    pub sign: bool,
    /// Create an annotated tag
    #[serde(default)]
    pub annotated: bool,
}

/// Tool for creating tags
#[derive(Clone)]
pub struct GitTagTool;

impl Tool for GitTagTool {
    type Args = GitTagArgs;

    fn name() -> &'static str {
        "git_tag"
    }

    fn description() -> &'static str {
        "Create a lightweight, annotated or signed tag. An existing tag is only \
         replaced with force=true."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if !is_valid_tag_name(&args.name) {
            return Ok(ToolResult::failure(
                "Invalid tag name. Use only letters, numbers, dots, hyphens, underscores, and slashes.",
                "Invalid tag name format",
            ));
        }
        if args.commit.as_deref().is_some_and(looks_like_option) {
            return Ok(ToolResult::failure(
                "Commit must be a revision, not an option",
                "Invalid commit reference",
            ));
        }
        let name = args.name.clone();
        Ok(tag(ctx, args)
            .await
            .or_failure(format!("Failed to create tag '{name}'")))
    }
}

async fn tag(ctx: &ToolContext, args: GitTagArgs) -> Result<ToolResult, RunError> {
    let exists = ctx.ref_exists(&format!("refs/tags/{}", args.name)).await;
    let hazard = exists.then(|| {
        Hazard::new(
            format!("Tag '{}' already exists. Use force=true to replace it.", args.name),
            "Tag already exists",
            json!({ "tag": args.name }),
        )
    });

    if let Gate::Blocked(result) = SafetyGate::new(false, args.force).check(hazard) {
        return Ok(result);
    }

    let annotated = args.annotated || args.message.is_some();
    let mut cmd = vec!["tag".to_string()];
    if args.force {
        cmd.push("--force".to_string());
    }
    if args.sign {
        cmd.push("--sign".to_string());
    } else if annotated {
        cmd.push("--annotate".to_string());
    }
    if args.sign || annotated {
        let message = args.message.clone().unwrap_or_else(|| args.name.clone());
        cmd.extend(["--message".to_string(), message]);
    }
    cmd.push(args.name.clone());
    if let Some(commit) = &args.commit {
        cmd.push(commit.clone());
    }

    ctx.git(&cmd).await?;
    let kind = if args.sign || annotated { "annotated" } else { "lightweight" };

    let verb = if exists { "replaced" } else { "created" };
    Ok(ToolResult::success(format!("Tag '{}' {verb}", args.name)).with_data(json!({
        "name": args.name,
        "type": kind,
        "commit": args.commit.as_deref().unwrap_or("HEAD"),
        "message": args.message,
        "signed": args.sign,
        "replaced": exists,
    })))
}
