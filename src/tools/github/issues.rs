use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{count, default_limit, default_state, gh_output, repo_flag};
use crate::{OrFailure, Tool, ToolContext, ToolResult};

const LIST_FIELDS: &str = "number,title,state,author,assignees,labels,createdAt,updatedAt,url";
const VIEW_FIELDS: &str = "number,title,body,state,author,assignees,labels,createdAt,updatedAt,closedAt,url";

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhIssueListArgs {
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// `open`, `closed` or `all`
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// Maximum number of issues
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Clone)]
pub struct GhIssueListTool;

impl Tool for GhIssueListTool {
    type Args = GhIssueListArgs;

    fn name() -> &'static str {
        "gh_issue_list"
    }

    fn description() -> &'static str {
        "List GitHub issues with filtering options"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["issue".to_string(), "list".to_string()];
        repo_flag(&mut cmd, &args.repo);
        cmd.extend(["--state".to_string(), args.state.clone()]);
        for (flag, value) in [("--assignee", &args.assignee), ("--author", &args.author), ("--label", &args.label)] {
            if let Some(value) = value {
                cmd.extend([flag.to_string(), value.clone()]);
            }
        }
        cmd.extend(["--limit".to_string(), args.limit.to_string()]);
        cmd.extend(["--json".to_string(), LIST_FIELDS.to_string()]);

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success(format!("Found {} issues", count(&data))).with_data(data));
        Ok(outcome.or_failure("Failed to list issues"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhIssueCreateArgs {
    /// Issue title
    pub title: String,
    /// Issue body
    #[serde(default)]
    pub body: Option<String>,
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// Users to assign
    #[serde(default)]
    pub assignee: Vec<String>,
    /// Labels to apply
    #[serde(default)]
    pub label: Vec<String>,
    /// Milestone name
    #[serde(default)]
    pub milestone: Option<String>,
}

#[derive(Clone)]
pub struct GhIssueCreateTool;

impl Tool for GhIssueCreateTool {
    type Args = GhIssueCreateArgs;

    fn name() -> &'static str {
        "gh_issue_create"
    }

    fn description() -> &'static str {
        "Create a new GitHub issue"
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["issue".to_string(), "create".to_string()];
        repo_flag(&mut cmd, &args.repo);
        cmd.extend(["--title".to_string(), args.title.clone()]);
        // gh prompts interactively without a body
        cmd.extend(["--body".to_string(), args.body.clone().unwrap_or_default()]);
        if !args.assignee.is_empty() {
            cmd.extend(["--assignee".to_string(), args.assignee.join(",")]);
        }
        if !args.label.is_empty() {
            cmd.extend(["--label".to_string(), args.label.join(",")]);
        }
        if let Some(milestone) = &args.milestone {
            cmd.extend(["--milestone".to_string(), milestone.clone()]);
        }

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|url| ToolResult::success("Issue created successfully").with_data(json!({ "url": url })));
        Ok(outcome.or_failure("Failed to create issue"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhIssueViewArgs {
    /// Issue number or URL
    pub issue: String,
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// Include comments
    #[serde(default)]
    pub comments: bool,
}

#[derive(Clone)]
pub struct GhIssueViewTool;

impl Tool for GhIssueViewTool {
    type Args = GhIssueViewArgs;

    fn name() -> &'static str {
        "gh_issue_view"
    }

    fn description() -> &'static str {
        "View details of a GitHub issue"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["issue".to_string(), "view".to_string(), args.issue.clone()];
        repo_flag(&mut cmd, &args.repo);
        let mut fields = VIEW_FIELDS.to_string();
        if args.comments {
            fields.push_str(",comments");
        }
        cmd.extend(["--json".to_string(), fields]);

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("Issue details retrieved successfully").with_data(data));
        Ok(outcome.or_failure("Failed to view issue"))
    }
}
