//! Git repository initialization tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitInitArgs {
    /// Directory to initialize (defaults to the working directory)
    #[serde(default)]
    pub path: Option<String>,
    /// Create a bare repository
    #[serde(default)]
    pub bare: bool,
    /// Name of the initial branch
    #[serde(default = "default_branch")]
    pub default_branch: String,
    /// Template directory to use
    #[serde(default)]
    pub template: Option<String>,
}

/// Tool for initializing Git repositories
#[derive(Clone)]
pub struct GitInitTool;

impl Tool for GitInitTool {
    type Args = GitInitArgs;

    fn name() -> &'static str {
        "git_init"
    }

    fn description() -> &'static str {
        "Initialize a new Git repository with an optional initial branch name, \
         template directory, or as a bare repository."
    }

    fn idempotent() -> bool {
        true // Re-running init on an existing repository is safe
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(init(ctx, args).await.or_failure("Failed to initialize repository"))
    }
}

async fn init(ctx: &ToolContext, args: GitInitArgs) -> Result<ToolResult, RunError> {
    let target = args
        .path
        .clone()
        .unwrap_or_else(|| ctx.working_directory().display().to_string());

    log::info!("Initializing Git repository at {target}");

    let mut cmd = vec!["init".to_string()];
    if args.bare {
        cmd.push("--bare".to_string());
    }
    if !args.default_branch.is_empty() {
        cmd.extend(["--initial-branch".to_string(), args.default_branch.clone()]);
    }
    if let Some(template) = &args.template {
        cmd.extend(["--template".to_string(), template.clone()]);
    }
    cmd.push(target.clone());

    ctx.git(&cmd).await?;

    Ok(ToolResult::success(format!("Repository initialized at {target}")).with_data(json!({
        "path": target,
        "bare": args.bare,
        "defaultBranch": args.default_branch,
    })))
}
