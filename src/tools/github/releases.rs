use schemars::JsonSchema;
use serde::Deserialize;

use super::{count, default_limit, gh_output, repo_flag};
use crate::{OrFailure, Tool, ToolContext, ToolResult};

const RELEASE_FIELDS: &str = "tagName,name,isDraft,isPrerelease,isLatest,createdAt,publishedAt";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhReleaseListArgs {
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// Maximum number of releases
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Clone)]
pub struct GhReleaseListTool;

impl Tool for GhReleaseListTool {
    type Args = GhReleaseListArgs;

    fn name() -> &'static str {
        "gh_release_list"
    }

    fn description() -> &'static str {
        "List GitHub releases"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["release".to_string(), "list".to_string()];
        repo_flag(&mut cmd, &args.repo);
        cmd.extend(["--limit".to_string(), args.limit.to_string()]);
        cmd.extend(["--json".to_string(), RELEASE_FIELDS.to_string()]);

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success(format!("Found {} releases", count(&data))).with_data(data));
        Ok(outcome.or_failure("Failed to list releases"))
    }
}
