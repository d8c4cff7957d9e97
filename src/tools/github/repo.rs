use schemars::JsonSchema;
use serde::Deserialize;

use super::gh_output;
use crate::{OrFailure, Tool, ToolContext, ToolResult};

const REPO_FIELDS: &str = "name,owner,description,url,sshUrl,pushedAt,createdAt,updatedAt,isPrivate,isFork,stargazerCount,forkCount,languages,repositoryTopics";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhRepoInfoArgs {
    /// Repository as `owner/repo` or URL (defaults to the current repository)
    #[serde(default)]
    pub repo: Option<String>,
    /// Request structured JSON output
    #[serde(default = "crate::tools::default_true")]
    pub json: bool,
}

#[derive(Clone)]
pub struct GhRepoInfoTool;

impl Tool for GhRepoInfoTool {
    type Args = GhRepoInfoArgs;

    fn name() -> &'static str {
        "gh_repo_info"
    }

    fn description() -> &'static str {
        "Get detailed information about a GitHub repository"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["repo".to_string(), "view".to_string()];
        if let Some(repo) = &args.repo {
            cmd.push(repo.clone());
        }
        if args.json {
            cmd.extend(["--json".to_string(), REPO_FIELDS.to_string()]);
        }

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("Repository information retrieved successfully").with_data(data));
        Ok(outcome.or_failure("Failed to get repository information"))
    }
}
