//! Git tag deletion tool

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::result::error_text;
use crate::{AggregatePolicy, BatchOutcome, Gate, Hazard, SafetyGate, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitTagDeleteArgs {
    /// Tags to delete
    pub tags: Vec<String>,
    /// Report which tags would be deleted
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool for deleting local tags
#[derive(Clone)]
pub struct GitTagDeleteTool;

impl Tool for GitTagDeleteTool {
    type Args = GitTagDeleteArgs;

    fn name() -> &'static str {
        "git_tag_delete"
    }

    fn description() -> &'static str {
        "Delete local tags. Missing tags are reported separately; the call \
         succeeds only when every existing tag was deleted."
    }

    fn destructive() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        if args.tags.is_empty() {
            return Ok(ToolResult::failure("No tags specified for deletion", "Missing tags"));
        }

        let mut existing = Vec::new();
        let mut missing = Vec::new();
        for tag in &args.tags {
            if ctx.ref_exists(&format!("refs/tags/{tag}")).await {
                existing.push(tag.clone());
            } else {
                missing.push(tag.clone());
            }
        }

        // Deleting nothing is refused, dry run or not
        if existing.is_empty() {
            return Ok(Hazard::new(
                "None of the specified tags exist",
                "No valid tags found",
                json!({ "nonExistentTags": missing }),
            )
            .into_result());
        }

        match SafetyGate::new(args.dry_run, false).check(None) {
            Gate::Blocked(result) => return Ok(result),
            Gate::Preview => {
                return Ok(ToolResult::preview(
                    format!("Would delete {} tags", existing.len()),
                    json!({ "wouldDelete": existing, "nonExistent": missing }),
                ));
            }
            Gate::Proceed => {}
        }

        let mut outcome = BatchOutcome::new();
        for tag in &existing {
            match ctx.git(&["tag", "--delete", tag.as_str()]).await {
                Ok(_) => outcome.succeed(tag),
                Err(e) => outcome.fail(tag, error_text(&e)),
            }
        }

        let message = format!("Deleted {} of {} tags", outcome.succeeded().len(), existing.len());
        let data = json!({
            "deleted": outcome.succeeded(),
            "failed": outcome.failed_json(),
            "nonExistent": missing,
            "total": args.tags.len(),
            "successful": outcome.succeeded().len(),
        });
        Ok(outcome.into_result(AggregatePolicy::AllSucceeded, message, data))
    }
}
