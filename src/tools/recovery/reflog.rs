//! Git reflog tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::parse_reflog;
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReflogAction {
    #[default]
    Show,
    Expire,
    Delete,
}

fn default_reference() -> String {
    "HEAD".to_string()
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitReflogArgs {
    /// Operation to perform
    #[serde(default)]
    pub action: ReflogAction,
    /// Reference whose log to use
    #[serde(default = "default_reference")]
    pub reference: String,
    /// Maximum number of entries to show
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Operate on every reference
    #[serde(default)]
    pub all: bool,
    /// Expiry cutoff for `expire`, e.g. `30.days.ago` or `now`
    #[serde(default)]
    pub expire_time: Option<String>,
}

/// Tool for inspecting and pruning the reflog
#[derive(Clone)]
pub struct GitReflogTool;

impl Tool for GitReflogTool {
    type Args = GitReflogArgs;

    fn name() -> &'static str {
        "git_reflog"
    }

    fn description() -> &'static str {
        "Show where HEAD and branches have pointed, to recover lost commits. \
         Can also expire old entries or delete the newest entry."
    }

    fn destructive() -> bool {
        true // expire and delete drop recovery points
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let cmd: Vec<String> = match (args.action, args.expire_time.as_deref()) {
            (ReflogAction::Show, _) => {
                let mut cmd = vec!["reflog".to_string(), "show".to_string()];
                if args.all {
                    cmd.push("--all".to_string());
                } else {
                    cmd.push(args.reference.clone());
                }
                cmd.push(format!("-{}", args.limit));
                cmd
            }
            (ReflogAction::Expire, Some(time)) => {
                let mut cmd = vec!["reflog".to_string(), "expire".to_string(), format!("--expire={time}")];
                if args.all {
                    cmd.push("--all".to_string());
                } else {
                    cmd.push(args.reference.clone());
                }
                cmd
            }
            (ReflogAction::Delete, _) => vec![
                "reflog".to_string(),
                "delete".to_string(),
                format!("{}@{{0}}", args.reference),
            ],
            (ReflogAction::Expire, None) => {
                return Ok(ToolResult::failure(
                    "Invalid reflog action or missing parameters",
                    "expireTime is required for expire",
                ));
            }
        };

        Ok(reflog(ctx, &cmd, &args).await.or_failure("Failed to access reflog"))
    }
}

async fn reflog(ctx: &ToolContext, cmd: &[String], args: &GitReflogArgs) -> Result<ToolResult, RunError> {
    let output = ctx.git(cmd).await?;

    match args.action {
        ReflogAction::Show => {
            let entries = parse_reflog(&output.stdout, &args.reference, args.limit);
            Ok(ToolResult::success(format!("Retrieved {} reflog entries", entries.len())).with_data(json!({
                "reference": args.reference,
                "entries": entries,
                "total": entries.len(),
            })))
        }
        ReflogAction::Expire => {
            let reference = if args.all { "--all" } else { args.reference.as_str() };
            Ok(ToolResult::success("Reflog entries expired").with_data(json!({
                "reference": reference,
                "expireTime": args.expire_time,
            })))
        }
        ReflogAction::Delete => Ok(ToolResult::success(format!("Deleted newest reflog entry of {}", args.reference))
            .with_data(json!({ "reference": args.reference }))),
    }
}
