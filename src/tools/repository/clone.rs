//! Git clone tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitCloneArgs {
    /// Repository URL to clone
    pub url: String,
    /// Target directory name
    #[serde(default)]
    pub directory: Option<String>,
    /// Branch to check out after cloning
    #[serde(default)]
    pub branch: Option<String>,
    /// Create a shallow clone with this many commits
    #[serde(default)]
    pub depth: Option<u32>,
    /// Clone submodules recursively
    #[serde(default)]
    pub recursive: bool,
}

/// Tool for cloning remote repositories
#[derive(Clone)]
pub struct GitCloneTool;

impl Tool for GitCloneTool {
    type Args = GitCloneArgs;

    fn name() -> &'static str {
        "git_clone"
    }

    fn description() -> &'static str {
        "Clone a Git repository from a remote URL. Supports shallow clones, \
         a specific branch and recursive submodules."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(clone(ctx, args).await.or_failure("Failed to clone repository"))
    }
}

async fn clone(ctx: &ToolContext, args: GitCloneArgs) -> Result<ToolResult, RunError> {
    log::info!("Cloning repository from {}", args.url);

    let mut cmd = vec!["clone".to_string()];
    if let Some(branch) = &args.branch {
        cmd.extend(["--branch".to_string(), branch.clone()]);
    }
    if let Some(depth) = args.depth {
        cmd.extend(["--depth".to_string(), depth.to_string()]);
    }
    if args.recursive {
        cmd.push("--recursive".to_string());
    }
    cmd.push(args.url.clone());
    if let Some(directory) = &args.directory {
        cmd.push(directory.clone());
    }

    ctx.git(&cmd).await?;

    let directory = args
        .directory
        .clone()
        .unwrap_or_else(|| directory_from_url(&args.url));

    Ok(ToolResult::success(format!("Repository cloned to {directory}")).with_data(json!({
        "url": args.url,
        "directory": directory,
        "branch": args.branch,
        "depth": args.depth,
    })))
}

/// Directory Git picks for `url` when none is given.
fn directory_from_url(url: &str) -> String {
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() {
        "repository".to_string()
    } else {
        name.to_string()
    }
}
