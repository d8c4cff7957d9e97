//! Git blame tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::parse_line_porcelain;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitBlameArgs {
    /// File to annotate
    pub file: String,
    /// First line of the range (1-based)
    #[serde(default)]
    pub line_start: Option<u32>,
    /// Last line of the range
    #[serde(default)]
    pub line_end: Option<u32>,
    /// Include author emails
    #[serde(default)]
    pub show_email: bool,
    /// Include line numbers
    #[serde(default = "crate::tools::default_true")]
    pub show_line_numbers: bool,
}

/// Tool for line-by-line authorship
#[derive(Clone)]
pub struct GitBlameTool;

impl Tool for GitBlameTool {
    type Args = GitBlameArgs;

    fn name() -> &'static str {
        "git_blame"
    }

    fn description() -> &'static str {
        "Show which commit and author last modified each line of a file, \
         optionally limited to a line range."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if args.file.trim().is_empty() {
            return Ok(ToolResult::failure("File path is required", "Missing file"));
        }
        let file = args.file.clone();
        Ok(blame(ctx, args)
            .await
            .or_failure(format!("Failed to get blame for {file}")))
    }
}

async fn blame(ctx: &ToolContext, args: GitBlameArgs) -> Result<ToolResult, RunError> {
    let mut cmd = vec!["blame".to_string(), "--line-porcelain".to_string()];
    let range = match (args.line_start, args.line_end) {
        (Some(start), Some(end)) => Some(format!("{start},{end}")),
        (Some(start), None) => Some(format!("{start},+1")),
        _ => None,
    };
    if let Some(range) = &range {
        cmd.extend(["-L".to_string(), range.clone()]);
    }
    cmd.extend(["--".to_string(), args.file.clone()]);

    let output = ctx.git(&cmd).await?;

    let lines: Vec<_> = parse_line_porcelain(&output.stdout)
        .into_iter()
        .map(|mut line| {
            if !args.show_email {
                line.email = None;
            }
            let mut value = json!(line);
            if !args.show_line_numbers {
                if let Some(map) = value.as_object_mut() {
                    map.remove("line");
                }
            }
            value
        })
        .collect();

    Ok(ToolResult::success(format!("Blame retrieved for {}", args.file)).with_data(json!({
        "file": args.file,
        "lines": lines,
        "lineRange": range,
    })))
}
