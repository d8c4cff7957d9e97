//! Git remote management tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RemoteAction {
    Add,
    Remove,
    SetUrl,
    List,
    Show,
}

impl RemoteAction {
    fn as_str(self) -> &'static str {
        match self {
            RemoteAction::Add => "add",
            RemoteAction::Remove => "remove",
            RemoteAction::SetUrl => "set-url",
            RemoteAction::List => "list",
            RemoteAction::Show => "show",
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitRemoteArgs {
    /// Operation to perform
    pub action: RemoteAction,
    /// Remote name
    #[serde(default)]
    pub name: Option<String>,
    /// Remote URL (add and set-url)
    #[serde(default)]
    pub url: Option<String>,
    /// Show URLs when listing
    #[serde(default = "crate::tools::default_true")]
    pub verbose: bool,
}

/// Tool for listing and editing remotes
#[derive(Clone)]
pub struct GitRemoteTool;

impl Tool for GitRemoteTool {
    type Args = GitRemoteArgs;

    fn name() -> &'static str {
        "git_remote"
    }

    fn description() -> &'static str {
        "Manage remote repositories: list, add, remove, change URL or show details."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let action = args.action.as_str();

        let cmd: Vec<String> = match (args.action, args.name.as_deref(), args.url.as_deref()) {
            (RemoteAction::List, _, _) if args.verbose => vec!["remote".into(), "-v".into()],
            (RemoteAction::List, _, _) => vec!["remote".into()],
            (RemoteAction::Add, Some(name), Some(url)) => {
                vec!["remote".into(), "add".into(), name.into(), url.into()]
            }
            (RemoteAction::Add, _, _) => {
                return Ok(ToolResult::failure(
                    "Remote name and URL are required for add action",
                    "Missing name or url",
                ));
            }
            (RemoteAction::SetUrl, Some(name), Some(url)) => {
                vec!["remote".into(), "set-url".into(), name.into(), url.into()]
            }
            (RemoteAction::SetUrl, _, _) => {
                return Ok(ToolResult::failure(
                    "Remote name and URL are required for set-url action",
                    "Missing name or url",
                ));
            }
            (RemoteAction::Remove, Some(name), _) => vec!["remote".into(), "remove".into(), name.into()],
            (RemoteAction::Show, Some(name), _) => vec!["remote".into(), "show".into(), name.into()],
            (RemoteAction::Remove | RemoteAction::Show, None, _) => {
                return Ok(ToolResult::failure(
                    format!("Remote name is required for {action} action"),
                    "Missing name",
                ));
            }
        };

        Ok(remote(ctx, &cmd, &args)
            .await
            .or_failure(format!("Failed to {action} remote")))
    }
}

async fn remote(ctx: &ToolContext, cmd: &[String], args: &GitRemoteArgs) -> Result<ToolResult, RunError> {
    let output = ctx.git(cmd).await?;
    let action = args.action.as_str();

    Ok(ToolResult::success(format!("Remote {action} completed")).with_data(json!({
        "action": action,
        "name": args.name,
        "url": args.url,
        "output": output.trimmed(),
    })))
}
