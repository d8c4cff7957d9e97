//! Git log tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::{LOG_FORMAT, parse_log};
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

fn default_max_count() -> u32 {
    10
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitLogArgs {
    /// Maximum number of commits to return
    #[serde(default = "default_max_count")]
    pub max_count: u32,
    /// Also produce a one-line-per-commit rendering
    #[serde(default)]
    pub oneline: bool,
    /// Also produce an ASCII graph rendering
    #[serde(default)]
    pub graph: bool,
    /// Filter by author
    #[serde(default)]
    pub author: Option<String>,
    /// Commits more recent than this date
    #[serde(default)]
    pub since: Option<String>,
    /// Commits older than this date
    #[serde(default)]
    pub until: Option<String>,
    /// Filter by commit message pattern
    #[serde(default)]
    pub grep: Option<String>,
    /// Only commits touching this path
    #[serde(default)]
    pub path: Option<String>,
}

impl GitLogArgs {
    fn filters(&self) -> Vec<String> {
        let mut out = vec![format!("--max-count={}", self.max_count)];
        if let Some(author) = &self.author {
            out.push(format!("--author={author}"));
        }
        if let Some(since) = &self.since {
            out.push(format!("--since={since}"));
        }
        if let Some(until) = &self.until {
            out.push(format!("--until={until}"));
        }
        if let Some(grep) = &self.grep {
            out.push(format!("--grep={grep}"));
        }
        out
    }

    fn pathspec(&self) -> Vec<String> {
        match &self.path {
            Some(path) => vec!["--".to_string(), path.clone()],
            None => Vec::new(),
        }
    }
}

/// Tool for browsing commit history
#[derive(Clone)]
pub struct GitLogTool;

impl Tool for GitLogTool {
    type Args = GitLogArgs;

    fn name() -> &'static str {
        "git_log"
    }

    fn description() -> &'static str {
        "Show commit history with optional author, date, message and path filters. \
         Returns structured commits; graph or oneline output is included as text."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(log(ctx, args).await.or_failure("Failed to get commit history"))
    }
}

async fn log(ctx: &ToolContext, args: GitLogArgs) -> Result<ToolResult, RunError> {
    let mut cmd = vec!["log".to_string(), LOG_FORMAT.to_string()];
    cmd.extend(args.filters());
    cmd.extend(args.pathspec());

    let output = ctx.git(&cmd).await?;
    let commits = parse_log(&output.stdout);

    let formatted = if args.graph || args.oneline {
        let mut display = vec!["log".to_string()];
        if args.oneline {
            display.push("--oneline".to_string());
        }
        if args.graph {
            display.push("--graph".to_string());
        }
        display.extend(args.filters());
        display.extend(args.pathspec());
        Some(ctx.git(&display).await?.stdout)
    } else {
        None
    };

    let mut data = json!({
        "commits": commits,
        "total": commits.len(),
        "latest": commits.first(),
    });
    if let Some(formatted) = formatted {
        data["formatted"] = json!(formatted);
    }

    Ok(ToolResult::success(format!("Retrieved {} commits", commits.len())).with_data(data))
}
