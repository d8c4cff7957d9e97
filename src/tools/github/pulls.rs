use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{count, default_limit, default_state, gh_output, repo_flag};
use crate::{OrFailure, Tool, ToolContext, ToolResult};

const LIST_FIELDS: &str =
    "number,title,state,author,assignees,labels,createdAt,updatedAt,mergedAt,headRefName,baseRefName,url";
const VIEW_FIELDS: &str = "number,title,body,state,author,assignees,reviewRequests,labels,createdAt,updatedAt,mergedAt,headRefName,baseRefName,mergeable,url";

fn default_base() -> String {
    "main".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhPrListArgs {
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// `open`, `closed`, `merged` or `all`
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    /// Filter by base branch
    #[serde(default)]
    pub base: Option<String>,
    /// Filter by head branch
    #[serde(default)]
    pub head: Option<String>,
    /// Maximum number of pull requests
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Clone)]
pub struct GhPrListTool;

impl Tool for GhPrListTool {
    type Args = GhPrListArgs;

    fn name() -> &'static str {
        "gh_pr_list"
    }

    fn description() -> &'static str {
        "List GitHub pull requests with filtering options"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["pr".to_string(), "list".to_string()];
        repo_flag(&mut cmd, &args.repo);
        cmd.extend(["--state".to_string(), args.state.clone()]);
        for (flag, value) in [
            ("--assignee", &args.assignee),
            ("--author", &args.author),
            ("--base", &args.base),
            ("--head", &args.head),
        ] {
            if let Some(value) = value {
                cmd.extend([flag.to_string(), value.clone()]);
            }
        }
        cmd.extend(["--limit".to_string(), args.limit.to_string()]);
        cmd.extend(["--json".to_string(), LIST_FIELDS.to_string()]);

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success(format!("Found {} pull requests", count(&data))).with_data(data));
        Ok(outcome.or_failure("Failed to list pull requests"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhPrCreateArgs {
    /// Pull request title
    pub title: String,
    /// Pull request body
    #[serde(default)]
    pub body: Option<String>,
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// Branch to merge into
    #[serde(default = "default_base")]
    pub base: String,
    /// Branch with the changes (defaults to the current branch)
    #[serde(default)]
    pub head: Option<String>,
    #[serde(default)]
    pub assignee: Vec<String>,
    #[serde(default)]
    pub reviewer: Vec<String>,
    #[serde(default)]
    pub label: Vec<String>,
    /// Open as a draft
    #[serde(default)]
    pub draft: bool,
}

#[derive(Clone)]
pub struct GhPrCreateTool;

impl Tool for GhPrCreateTool {
    type Args = GhPrCreateArgs;

    fn name() -> &'static str {
        "gh_pr_create"
    }

    fn description() -> &'static str {
        "Create a new GitHub pull request"
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["pr".to_string(), "create".to_string()];
        repo_flag(&mut cmd, &args.repo);
        cmd.extend(["--title".to_string(), args.title.clone()]);
        cmd.extend(["--body".to_string(), args.body.clone().unwrap_or_default()]);
        cmd.extend(["--base".to_string(), args.base.clone()]);
        if let Some(head) = &args.head {
            cmd.extend(["--head".to_string(), head.clone()]);
        }
        for (flag, values) in [("--assignee", &args.assignee), ("--reviewer", &args.reviewer), ("--label", &args.label)] {
            if !values.is_empty() {
                cmd.extend([flag.to_string(), values.join(",")]);
            }
        }
        if args.draft {
            cmd.push("--draft".to_string());
        }

        let outcome = gh_output(ctx, &cmd).await.map(|url| {
            ToolResult::success("Pull request created successfully").with_data(json!({
                "url": url,
                "base": args.base,
                "draft": args.draft,
            }))
        });
        Ok(outcome.or_failure("Failed to create pull request"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GhPrViewArgs {
    /// Pull request number, URL or branch
    pub pr: String,
    /// Repository as `owner/repo`
    #[serde(default)]
    pub repo: Option<String>,
    /// Include comments
    #[serde(default)]
    pub comments: bool,
}

#[derive(Clone)]
pub struct GhPrViewTool;

impl Tool for GhPrViewTool {
    type Args = GhPrViewArgs;

    fn name() -> &'static str {
        "gh_pr_view"
    }

    fn description() -> &'static str {
        "View details of a GitHub pull request"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["pr".to_string(), "view".to_string(), args.pr.clone()];
        repo_flag(&mut cmd, &args.repo);
        let mut fields = VIEW_FIELDS.to_string();
        if args.comments {
            fields.push_str(",comments");
        }
        cmd.extend(["--json".to_string(), fields]);

        let outcome = gh_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("Pull request details retrieved successfully").with_data(data));
        Ok(outcome.or_failure("Failed to view pull request"))
    }
}
