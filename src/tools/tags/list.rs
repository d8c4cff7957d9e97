//! Git tag listing tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::{TAG_FORMAT, parse_tag_info};
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TagSort {
    /// Alphabetical
    #[default]
    Refname,
    /// Semantic version order
    Version,
    /// Tag creation date
    Creatordate,
    /// Commit date
    Committerdate,
}

impl TagSort {
    fn key(self) -> &'static str {
        match self {
            TagSort::Refname => "refname",
            TagSort::Version => "version:refname",
            TagSort::Creatordate => "creatordate",
            TagSort::Committerdate => "committerdate",
        }
    }
}

fn default_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitTagListArgs {
    /// Glob pattern, e.g. `v1.*`
    #[serde(default)]
    pub pattern: Option<String>,
    /// Sort order
    #[serde(default)]
    pub sort: TagSort,
    /// Maximum number of tags to return
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Include type, commit, message, tagger and date
    #[serde(default)]
    pub detailed: bool,
    /// Only tags reachable from this commit
    #[serde(default)]
    pub merged: Option<String>,
    /// Only tags containing this commit
    #[serde(default)]
    pub contains: Option<String>,
}

/// Tool for listing tags
#[derive(Clone)]
pub struct GitTagListTool;

impl Tool for GitTagListTool {
    type Args = GitTagListArgs;

    fn name() -> &'static str {
        "git_tag_list"
    }

    fn description() -> &'static str {
        "List tags, optionally filtered by pattern or commit, sorted, and with \
         per-tag details."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(list(ctx, args).await.or_failure("Failed to list tags"))
    }
}

async fn list(ctx: &ToolContext, args: GitTagListArgs) -> Result<ToolResult, RunError> {
    let mut filters = vec![format!("--sort={}", args.sort.key())];
    if let Some(commit) = &args.merged {
        filters.push(format!("--merged={commit}"));
    }
    if let Some(commit) = &args.contains {
        filters.push(format!("--contains={commit}"));
    }

    let (tags, total) = if args.detailed {
        let mut cmd = vec!["for-each-ref".to_string(), TAG_FORMAT.to_string()];
        cmd.extend(filters);
        cmd.push(match &args.pattern {
            Some(pattern) => format!("refs/tags/{pattern}"),
            None => "refs/tags".to_string(),
        });
        let output = ctx.git(&cmd).await?;
        let all: Vec<_> = output.lines().filter_map(parse_tag_info).collect();
        let total = all.len();
        let tags: Vec<_> = all.into_iter().take(args.limit).map(|t| json!(t)).collect();
        (tags, total)
    } else {
        let mut cmd = vec!["tag".to_string(), "--list".to_string()];
        cmd.extend(filters);
        if let Some(pattern) = &args.pattern {
            cmd.push(pattern.clone());
        }
        let output = ctx.git(&cmd).await?;
        let all: Vec<&str> = output.lines().map(str::trim).collect();
        let total = all.len();
        let tags: Vec<_> = all.into_iter().take(args.limit).map(|t| json!(t)).collect();
        (tags, total)
    };

    Ok(ToolResult::success(format!("Found {} tags", tags.len())).with_data(json!({
        "tags": tags,
        "total": total,
        "hasMore": total > tags.len(),
    })))
}
