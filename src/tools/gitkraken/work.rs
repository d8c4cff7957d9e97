use schemars::JsonSchema;
use serde::Deserialize;

use super::gk_output;
use crate::{OrFailure, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkWorkCommitAiArgs {
    /// Hint for the generated message
    #[serde(default)]
    pub message: Option<String>,
    /// Include every change
    #[serde(default)]
    pub all: bool,
    /// Conventional commit scope
    #[serde(default)]
    pub scope: Option<String>,
}

#[derive(Clone)]
pub struct GkWorkCommitAiTool;

impl Tool for GkWorkCommitAiTool {
    type Args = GkWorkCommitAiArgs;

    fn name() -> &'static str {
        "gk_work_commit_ai"
    }

    fn description() -> &'static str {
        "Create a commit with an AI-generated message using GitKraken CLI"
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["work".to_string(), "commit".to_string(), "--ai".to_string()];
        if let Some(message) = &args.message {
            cmd.extend(["--message".to_string(), message.clone()]);
        }
        if args.all {
            cmd.push("--all".to_string());
        }
        if let Some(scope) = &args.scope {
            cmd.extend(["--scope".to_string(), scope.clone()]);
        }

        let outcome = gk_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("AI-generated commit created successfully").with_data(data));
        Ok(outcome.or_failure("Failed to create AI-generated commit"))
    }
}

fn default_base() -> String {
    "main".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkWorkPrCreateAiArgs {
    /// Title override
    #[serde(default)]
    pub title: Option<String>,
    /// Description override
    #[serde(default)]
    pub description: Option<String>,
    /// Branch to merge into
    #[serde(default = "default_base")]
    pub base: String,
    /// Open as a draft
    #[serde(default)]
    pub draft: bool,
}

#[derive(Clone)]
pub struct GkWorkPrCreateAiTool;

impl Tool for GkWorkPrCreateAiTool {
    type Args = GkWorkPrCreateAiArgs;

    fn name() -> &'static str {
        "gk_work_pr_create_ai"
    }

    fn description() -> &'static str {
        "Create a pull request with AI-generated title and description using GitKraken CLI"
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["work".to_string(), "pr".to_string(), "create".to_string(), "--ai".to_string()];
        if let Some(title) = &args.title {
            cmd.extend(["--title".to_string(), title.clone()]);
        }
        if let Some(description) = &args.description {
            cmd.extend(["--description".to_string(), description.clone()]);
        }
        cmd.extend(["--base".to_string(), args.base.clone()]);
        if args.draft {
            cmd.push("--draft".to_string());
        }

        let outcome = gk_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("AI-generated pull request created successfully").with_data(data));
        Ok(outcome.or_failure("Failed to create AI-generated pull request"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    #[default]
    Active,
    Completed,
    All,
}

impl WorkStatus {
    fn as_str(self) -> &'static str {
        match self {
            WorkStatus::Active => "active",
            WorkStatus::Completed => "completed",
            WorkStatus::All => "all",
        }
    }
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkWorkListArgs {
    /// Filter work items by status
    #[serde(default)]
    pub status: WorkStatus,
    /// Maximum number of work items
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Clone)]
pub struct GkWorkListTool;

impl Tool for GkWorkListTool {
    type Args = GkWorkListArgs;

    fn name() -> &'static str {
        "gk_work_list"
    }

    fn description() -> &'static str {
        "List work items in GitKraken"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let status = args.status.as_str();
        let cmd = vec![
            "work".to_string(),
            "list".to_string(),
            "--status".to_string(),
            status.to_string(),
            "--limit".to_string(),
            args.limit.to_string(),
        ];

        let outcome = gk_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success(format!("Found work items with status: {status}")).with_data(data));
        Ok(outcome.or_failure("Failed to list work items"))
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct GkSetupArgs {}

#[derive(Clone)]
pub struct GkSetupTool;

impl Tool for GkSetupTool {
    type Args = GkSetupArgs;

    fn name() -> &'static str {
        "gk_setup"
    }

    fn description() -> &'static str {
        "Display GitKraken CLI setup and configuration information"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, _args: Self::Args) -> anyhow::Result<ToolResult> {
        let outcome = gk_output(ctx, &["setup".to_string()])
            .await
            .map(|data| ToolResult::success("GitKraken CLI setup information retrieved").with_data(data));
        Ok(outcome.or_failure("Failed to get setup information"))
    }
}
