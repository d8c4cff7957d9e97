use schemars::JsonSchema;
use serde::Deserialize;

use super::{count, gh_output, repo_flag};
use crate::{OrFailure, Tool, ToolContext, ToolResult};

const RUN_FIELDS: &str =
    "databaseId,name,status,conclusion,workflowName,headBranch,event,createdAt,updatedAt,url";

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhWorkflowRunArgs {
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// Workflow name or file
    #[serde(default)]
    pub workflow: Option<String>,
    /// Filter by run status, e.g. `completed` or `in_progress`
    #[serde(default)]
    pub status: Option<String>,
    /// Maximum number of runs
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Clone)]
pub struct GhWorkflowRunTool;

impl Tool for GhWorkflowRunTool {
    type Args = GhWorkflowRunArgs;

    fn name() -> &'static str {
        "gh_workflow_run"
    }

    fn description() -> &'static str {
        "List GitHub Actions workflow runs"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["run".to_string(), "list".to_string()];
        repo_flag(&mut cmd, &args.repo);
        if let Some(workflow) = &args.workflow {
            cmd.extend(["--workflow".to_string(), workflow.clone()]);
        }
        if let Some(status) = &args.status {
            cmd.extend(["--status".to_string(), status.clone()]);
        }
        cmd.extend(["--limit".to_string(), args.limit.to_string()]);
        cmd.extend(["--json".to_string(), RUN_FIELDS.to_string()]);

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success(format!("Found {} workflow runs", count(&data))).with_data(data));
        Ok(outcome.or_failure("Failed to list workflow runs"))
    }
}
