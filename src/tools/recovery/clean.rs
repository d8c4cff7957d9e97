//! Git clean tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::{Gate, Hazard, OrFailure, RunError, SafetyGate, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitCleanArgs {
    /// List what would be removed without removing
    #[serde(default = "crate::tools::default_true")]
    pub dry_run: bool,
    /// Required for actual removal
    #[serde(default)]
    pub force: bool,
    /// Remove untracked directories too
    #[serde(default)]
    pub directories: bool,
    /// Remove ignored files too
    #[serde(default)]
    pub ignored: bool,
    /// Only clean these paths
    #[serde(default)]
    pub paths: Vec<String>,
    /// Patterns to keep
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl GitCleanArgs {
    fn options(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.directories {
            out.push("-d".to_string());
        }
        if self.ignored {
            out.push("-x".to_string());
        }
        for pattern in &self.exclude {
            out.extend(["--exclude".to_string(), pattern.clone()]);
        }
        if !self.paths.is_empty() {
            out.push("--".to_string());
            out.extend(self.paths.iter().cloned());
        }
        out
    }
}

/// Tool for removing untracked files
#[derive(Clone)]
pub struct GitCleanTool;

impl Tool for GitCleanTool {
    type Args = GitCleanArgs;

    fn name() -> &'static str {
        "git_clean"
    }

    fn description() -> &'static str {
        "Remove untracked files. Runs as a dry run by default; actual removal \
         requires dryRun=false and force=true."
    }

    fn destructive() -> bool {
        true // Deleted files are not recoverable
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        Ok(clean(ctx, args).await.or_failure("Failed to clean working tree"))
    }
}

/// Paths from `git clean` output, without the `Would remove` / `Removing` prefix.
fn removed_paths(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.strip_prefix("Would remove ")
                .or_else(|| line.strip_prefix("Removing "))
                .unwrap_or(line)
                .to_string()
        })
        .collect()
}

async fn clean(ctx: &ToolContext, args: GitCleanArgs) -> Result<ToolResult, RunError> {
    let mut preview = vec!["clean".to_string(), "-n".to_string()];
    preview.extend(args.options());
    let would_remove = removed_paths(&ctx.git(&preview).await?.stdout);

    let hazard = Hazard::new(
        "Force flag required for actual file removal. Use dryRun=false and force=true.",
        "Safety check: force flag required",
        json!({ "wouldRemove": would_remove }),
    );

    match SafetyGate::new(args.dry_run, args.force).check(Some(hazard)) {
        Gate::Blocked(result) => Ok(result),
        Gate::Preview => Ok(ToolResult::preview(
            format!("Clean completed: {} files would be removed", would_remove.len()),
            json!({ "files": would_remove, "count": would_remove.len() }),
        )),
        Gate::Proceed => {
            let mut cmd = vec!["clean".to_string(), "-f".to_string()];
            cmd.extend(args.options());
            let removed = removed_paths(&ctx.git(&cmd).await?.stdout);
            log::info!("Removed {} untracked files", removed.len());

            Ok(ToolResult::success(format!("Clean completed: {} files removed", removed.len())).with_data(
                json!({
                    "files": removed,
                    "count": removed.len(),
                    "dryRun": false,
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_stripped() {
        let out = "Would remove build/\nWould remove notes.txt\n";
        assert_eq!(removed_paths(out), vec!["build/", "notes.txt"]);
        assert_eq!(removed_paths("Removing tmp.log\n"), vec!["tmp.log"]);
    }
}
