//! Git configuration tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConfigAction {
    Get,
    Set,
    Unset,
    List,
}

impl ConfigAction {
    fn as_str(self) -> &'static str {
        match self {
            ConfigAction::Get => "get",
            ConfigAction::Set => "set",
            ConfigAction::Unset => "unset",
            ConfigAction::List => "list",
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitConfigArgs {
    /// Operation to perform
    pub action: ConfigAction,
    /// Configuration key, e.g. `user.name`
    #[serde(default)]
    pub key: Option<String>,
    /// Value to set
    #[serde(default)]
    pub value: Option<String>,
    /// Use the global configuration file
    #[serde(default)]
    pub global: bool,
    /// Use the system configuration file
    #[serde(default)]
    pub system: bool,
}

/// Tool for reading and writing Git configuration
#[derive(Clone)]
pub struct GitConfigTool;

impl Tool for GitConfigTool {
    type Args = GitConfigArgs;

    fn name() -> &'static str {
        "git_config"
    }

    fn description() -> &'static str {
        "Get, set, unset or list Git configuration values at repository, \
         global or system scope."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["config".to_string()];
        if args.global {
            cmd.push("--global".to_string());
        }
        if args.system {
            cmd.push("--system".to_string());
        }

        match (args.action, args.key.as_deref(), args.value.as_deref()) {
            (ConfigAction::List, _, _) => cmd.push("--list".to_string()),
            (ConfigAction::Get, Some(key), _) => cmd.push(key.to_string()),
            (ConfigAction::Set, Some(key), Some(value)) => {
                cmd.extend([key.to_string(), value.to_string()]);
            }
            (ConfigAction::Unset, Some(key), _) => {
                cmd.extend(["--unset".to_string(), key.to_string()]);
            }
            (ConfigAction::Set, _, _) => {
                return Ok(ToolResult::failure(
                    "Key and value are required for set action",
                    "Missing key or value",
                ));
            }
            (action, None, _) => {
                return Ok(ToolResult::failure(
                    format!("Key is required for {} action", action.as_str()),
                    "Missing key",
                ));
            }
        }

        let action = args.action.as_str();
        Ok(config(ctx, &cmd, &args)
            .await
            .or_failure(format!("Failed to {action} config")))
    }
}

async fn config(ctx: &ToolContext, cmd: &[String], args: &GitConfigArgs) -> Result<ToolResult, RunError> {
    let output = ctx.git(cmd).await?;
    let action = args.action.as_str();

    Ok(ToolResult::success(format!("Git config {action} completed")).with_data(json!({
        "action": action,
        "key": args.key,
        "value": args.value,
        "output": output.trimmed(),
    })))
}
