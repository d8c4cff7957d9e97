//! Git branch deletion tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::looks_like_option;
use crate::result::error_text;
use crate::{AggregatePolicy, BatchOutcome, Gate, SafetyGate, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitBranchDeleteArgs {
    /// Branches to delete
    pub names: Vec<String>,
    /// Delete even when not fully merged
    #[serde(default)]
    pub force: bool,
    /// Delete remote-tracking branches
    #[serde(default)]
    pub remote: bool,
    /// Check which branches could be deleted without deleting
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for deleting branches
#[derive(Clone)]
pub struct GitBranchDeleteTool;

impl Tool for GitBranchDeleteTool {
    type Args = GitBranchDeleteArgs;

    fn name() -> &'static str {
        "git_branch_delete"
    }

    fn description() -> &'static str {
        "Delete one or more branches. Unmerged branches need force; the current \
         branch is never deleted. Succeeds when at least one branch was deleted."
    }

    fn destructive() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if args.names.is_empty() {
            return Ok(ToolResult::failure("No branches specified for deletion", "Missing names"));
        }

        let current = ctx.current_branch().await.ok();
        let gate = SafetyGate::new(args.dry_run, args.force);
        let mut outcome = BatchOutcome::new();
        let mut results = Vec::with_capacity(args.names.len());

        for name in &args.names {
            let deleted = if current.as_deref() == Some(name.as_str()) && !args.remote {
                Err("Cannot delete current branch".to_string())
            } else if looks_like_option(name) {
                Err("Invalid branch name".to_string())
            } else {
                match gate.check(None) {
                    Gate::Preview => {
                        let prefix = if args.remote { "refs/remotes" } else { "refs/heads" };
                        if ctx.ref_exists(&format!("{prefix}/{name}")).await {
                            Ok(())
                        } else {
                            Err("Branch does not exist".to_string())
                        }
                    }
                    Gate::Proceed => {
                        let mut cmd = vec!["branch".to_string()];
                        if args.remote {
                            cmd.push("-r".to_string());
                        }
                        cmd.push(if args.force { "-D" } else { "-d" }.to_string());
                        cmd.push(name.clone());
                        ctx.git(&cmd).await.map(|_| ()).map_err(|e| error_text(&e))
                    }
                    Gate::Blocked(result) => return Ok(result),
                }
            };

            match deleted {
                Ok(()) => {
                    results.push(json!({ "branch": name, "success": true }));
                    outcome.succeed(name);
                }
                Err(error) => {
                    outcome.fail(name, error.clone());
                    results.push(json!({ "branch": name, "success": false, "error": error }));
                }
            }
        }

        let verb = if args.dry_run { "Would delete" } else { "Deleted" };
        let message = format!("{verb} {}/{} branches", outcome.succeeded().len(), outcome.total());

        let data = json!({
            "results": results,
            "successCount": outcome.succeeded().len(),
            "totalCount": outcome.total(),
            "dryRun": args.dry_run,
        });

        Ok(outcome.into_result(AggregatePolicy::AnySucceeded, message, data))
    }
}
