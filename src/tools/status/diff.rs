//! Git diff tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DiffTarget {
    /// Unstaged changes
    #[default]
    Working,
    /// Staged changes
    Staged,
    /// A commit against its parent, or two commits
    Commit,
    /// Between branches
    Branch,
}

impl DiffTarget {
    fn as_str(self) -> &'static str {
        match self {
            DiffTarget::Working => "working",
            DiffTarget::Staged => "staged",
            DiffTarget::Commit => "commit",
            DiffTarget::Branch => "branch",
        }
    }
}

fn default_context_lines() -> u32 {
    3
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitDiffArgs {
    /// What to compare
    #[serde(default)]
    pub target: DiffTarget,
    /// First commit or branch
    #[serde(default)]
    pub commit1: Option<String>,
    /// Second commit or branch
    #[serde(default)]
    pub commit2: Option<String>,
    /// Limit the diff to this path
    #[serde(default)]
    pub path: Option<String>,
    /// Only list changed file names
    #[serde(default)]
    pub name_only: bool,
    /// Show a diffstat instead of the patch
    #[serde(default)]
    pub stat: bool,
    /// Lines of context around each change
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,
}

/// Tool for showing changes between trees
#[derive(Clone)]
pub struct GitDiffTool;

impl Tool for GitDiffTool {
    type Args = GitDiffArgs;

    fn name() -> &'static str {
        "git_diff"
    }

    fn description() -> &'static str {
        "Show changes in the working tree, the index, a commit, or between \
         commits and branches."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["diff".to_string()];
        if args.context_lines != 3 {
            cmd.push(format!("-U{}", args.context_lines));
        }
        if args.name_only {
            cmd.push("--name-only".to_string());
        }
        if args.stat {
            cmd.push("--stat".to_string());
        }

        match args.target {
            DiffTarget::Working => {}
            DiffTarget::Staged => cmd.push("--cached".to_string()),
            DiffTarget::Commit | DiffTarget::Branch => {
                let Some(first) = args.commit1.clone() else {
                    return Ok(ToolResult::failure(
                        format!("commit1 is required for {} target", args.target.as_str()),
                        "Missing commit1",
                    ));
                };
                match (&args.commit2, args.target) {
                    (Some(second), _) => cmd.extend([first, second.clone()]),
                    (None, DiffTarget::Commit) => cmd.extend([format!("{first}^"), first]),
                    (None, _) => cmd.push(first),
                }
            }
        }

        if let Some(path) = &args.path {
            cmd.extend(["--".to_string(), path.clone()]);
        }

        Ok(diff(ctx, &cmd, &args).await.or_failure("Failed to get diff"))
    }
}

async fn diff(ctx: &ToolContext, cmd: &[String], args: &GitDiffArgs) -> Result<ToolResult, RunError> {
    let output = ctx.git(cmd).await?;

    let message = if output.trimmed().is_empty() {
        "No differences found".to_string()
    } else {
        format!("Diff for {} retrieved", args.target.as_str())
    };

    Ok(ToolResult::success(message).with_data(json!({
        "diff": output.stdout,
        "target": args.target.as_str(),
        "commit1": args.commit1,
        "commit2": args.commit2,
        "path": args.path,
        "options": {
            "nameOnly": args.name_only,
            "stat": args.stat,
            "contextLines": args.context_lines,
        },
    })))
}
