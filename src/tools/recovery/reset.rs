//! Git reset tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::short;
use crate::{Gate, Hazard, OrFailure, RunError, SafetyGate, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResetMode {
    /// Move HEAD only
    Soft,
    /// Move HEAD and reset the index
    #[default]
    Mixed,
    /// Move HEAD, reset the index and the working tree
    Hard,
}

impl ResetMode {
    fn as_str(self) -> &'static str {
        match self {
            ResetMode::Soft => "soft",
            ResetMode::Mixed => "mixed",
            ResetMode::Hard => "hard",
        }
    }
}

fn default_target() -> String {
    "HEAD".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitResetArgs {
    /// Reset mode
    #[serde(default)]
    pub mode: ResetMode,
    /// Commit to reset to
    #[serde(default = "default_target")]
    pub target: String,
    /// Reset only these paths in the index
    #[serde(default)]
    pub paths: Vec<String>,
    /// Allow a hard reset to discard uncommitted changes
    #[serde(default)]
    pub force: bool,
    /// Show what would happen without resetting
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for moving HEAD and resetting state
#[derive(Clone)]
pub struct GitResetTool;

impl Tool for GitResetTool {
    type Args = GitResetArgs;

    fn name() -> &'static str {
        "git_reset"
    }

    fn description() -> &'static str {
        "Reset the current branch to a commit in soft, mixed or hard mode. A hard \
         reset over uncommitted changes is refused unless force is set."
    }

    fn destructive() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(reset(ctx, args).await.or_failure("Failed to reset"))
    }
}

async fn reset(ctx: &ToolContext, args: GitResetArgs) -> Result<ToolResult, RunError> {
    let mode = args.mode.as_str();

    let hazard = if args.mode == ResetMode::Hard && !args.force {
        let tree = ctx.working_tree().await?;
        (!tree.is_clean()).then(|| {
            Hazard::new(
                "Hard reset would lose uncommitted changes. Use force=true to proceed.",
                "Uncommitted changes detected",
                json!({ "uncommittedFiles": tree.files }),
            )
        })
    } else {
        None
    };

    match SafetyGate::new(args.dry_run, args.force).check(hazard) {
        Gate::Blocked(result) => Ok(result),
        Gate::Preview => {
            let current = ctx.rev_parse("HEAD").await?;
            let target = ctx.rev_parse(&args.target).await?;
            Ok(ToolResult::preview(
                format!("Would reset {mode} to {}", short(&target)),
                json!({
                    "mode": mode,
                    "currentCommit": short(&current),
                    "targetCommit": short(&target),
                    "paths": args.paths,
                }),
            ))
        }
        Gate::Proceed => {
            let mut cmd = vec!["reset".to_string()];
            if args.paths.is_empty() {
                cmd.push(format!("--{mode}"));
                cmd.push(args.target.clone());
            } else {
                // Path resets only touch the index
                cmd.push(args.target.clone());
                cmd.push("--".to_string());
                cmd.extend(args.paths.iter().cloned());
            }
            ctx.git(&cmd).await?;
            log::info!("Reset {mode} to {}", args.target);

            Ok(ToolResult::success(format!("Reset {mode} completed successfully")).with_data(json!({
                "mode": mode,
                "target": args.target,
                "paths": args.paths,
            })))
        }
    }
}
