use schemars::JsonSchema;
use serde::Deserialize;

use super::gk_output;
use crate::{OrFailure, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkWorkspaceListArgs {
    /// Include repositories and settings
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Clone)]
pub struct GkWorkspaceListTool;

impl Tool for GkWorkspaceListTool {
    type Args = GkWorkspaceListArgs;

    fn name() -> &'static str {
        "gk_workspace_list"
    }

    fn description() -> &'static str {
        "List GitKraken workspaces"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["workspace".to_string(), "list".to_string()];
        if args.detailed {
            cmd.push("--detailed".to_string());
        }

        let outcome = gk_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("Workspaces listed successfully").with_data(data));
        Ok(outcome.or_failure("Failed to list workspaces"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkWorkspaceCreateArgs {
    /// Workspace name
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Repositories to include, as paths or `owner/repo`
    #[serde(default)]
    pub repos: Vec<String>,
}

#[derive(Clone)]
pub struct GkWorkspaceCreateTool;

impl Tool for GkWorkspaceCreateTool {
    type Args = GkWorkspaceCreateArgs;

    fn name() -> &'static str {
        "gk_workspace_create"
    }

    fn description() -> &'static str {
        "Create a GitKraken workspace grouping several repositories"
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["workspace".to_string(), "create".to_string(), args.name.clone()];
        if let Some(description) = &args.description {
            cmd.extend(["--description".to_string(), description.clone()]);
        }
        if !args.repos.is_empty() {
            cmd.extend(["--repos".to_string(), args.repos.join(",")]);
        }

        let outcome = gk_output(ctx, &cmd).await.map(|data| {
            ToolResult::success(format!("Workspace \"{}\" created successfully", args.name)).with_data(data)
        });
        Ok(outcome.or_failure("Failed to create workspace"))
    }
}
