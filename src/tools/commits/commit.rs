//! Git commit tool
//!
//! Messages are either given verbatim or assembled from conventional commit
//! parts. Both paths apply the configured gitmoji and convention switches.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::operations::{CommitType, ConventionalParts, MessageStyle, decorate_message, format_conventional, short};
use crate::{OrFailure, RunError, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GitCommitArgs {
    /// Complete commit message
    #[serde(default)]
    pub message: Option<String>,
    /// Conventional commit type, used with `description`
    #[serde(default, rename = "type")]
    pub kind: Option<CommitType>,
    /// Conventional commit scope
    #[serde(default)]
    pub scope: Option<String>,
    /// Conventional commit description
    #[serde(default)]
    pub description: Option<String>,
    /// Longer message body
    #[serde(default)]
    pub body: Option<String>,
    /// Mark as a breaking change
    #[serde(default)]
    pub breaking: bool,
    /// Prefix the subject with a gitmoji
    #[serde(default = "crate::tools::default_true")]
    pub gitmoji: bool,
    /// Stage tracked changes before committing
    #[serde(default)]
    pub all: bool,
    /// Amend the previous commit
    #[serde(default)]
    pub amend: bool,
    /// Build the message without committing
    #[serde(default)]
    pub dry_run: bool,
}

impl GitCommitArgs {
    /// Final message, `None` when neither form was supplied.
    fn render(&self, style: MessageStyle) -> Option<String> {
        if let (Some(kind), Some(description)) = (self.kind, self.description.as_deref()) {
            let parts = ConventionalParts {
                kind,
                scope: self.scope.as_deref(),
                description,
                body: self.body.as_deref(),
                breaking: self.breaking,
            };
            return Some(format_conventional(&parts, style));
        }
        let message = self.message.as_deref().filter(|m| !m.trim().is_empty())?;
        let mut message = decorate_message(message, style);
        if let Some(body) = self.body.as_deref().filter(|b| !b.is_empty()) {
            message.push_str("\n\n");
            message.push_str(body);
        }
        Some(message)
    }
}

/// Tool for recording commits
#[derive(Clone)]
pub struct GitCommitTool;

impl Tool for GitCommitTool {
    type Args = GitCommitArgs;

    fn name() -> &'static str {
        "git_commit"
    }

    fn description() -> &'static str {
        "Create a commit. Accepts a full message or conventional commit parts \
         (type, scope, description, body, breaking) and can add a gitmoji."
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let style = MessageStyle {
            conventions: ctx.config().auto_commit_conventions,
            gitmoji: args.gitmoji && ctx.config().gitmojis,
        };
        let Some(message) = args.render(style) else {
            return Ok(ToolResult::failure(
                "Either message or type+description is required",
                "Missing commit message",
            ));
        };

        Ok(commit(ctx, &args, message)
            .await
            .or_failure("Failed to create commit"))
    }
}

async fn commit(ctx: &ToolContext, args: &GitCommitArgs, message: String) -> Result<ToolResult, RunError> {
    if args.dry_run {
        let tree = ctx.working_tree().await?;
        let files: Vec<String> = if args.all {
            tree.files.iter().filter(|f| f.status != "??").map(|f| f.path.clone()).collect()
        } else {
            tree.staged
        };
        return Ok(ToolResult::preview(
            format!("Would commit {} files", files.len()),
            json!({ "message": message, "files": files, "amend": args.amend }),
        ));
    }

    let mut cmd = vec!["commit".to_string()];
    if args.all {
        cmd.push("-a".to_string());
    }
    if args.amend {
        cmd.push("--amend".to_string());
    }
    cmd.extend(["-m".to_string(), message.clone()]);

    ctx.git(&cmd).await?;
    let hash = ctx.rev_parse("HEAD").await?;

    log::info!("Created commit {}", short(&hash));

    Ok(ToolResult::success(format!("Commit created: {}", short(&hash))).with_data(json!({
        "hash": hash,
        "shortHash": short(&hash),
        "message": message,
        "amend": args.amend,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: serde_json::Value) -> GitCommitArgs {
        serde_json::from_value(value).unwrap_or_else(|e| panic!("bad args: {e}"))
    }

    const PLAIN: MessageStyle = MessageStyle {
        conventions: true,
        gitmoji: false,
    };

    #[test]
    fn structured_parts_take_precedence() {
        let args = args(json!({
            "message": "ignored",
            "type": "fix",
            "scope": "parser",
            "description": "handle empty input",
        }));
        assert_eq!(args.render(PLAIN).as_deref(), Some("fix(parser): handle empty input"));
    }

    #[test]
    fn type_without_description_falls_back_to_message() {
        let args = args(json!({ "message": "Tidy up", "type": "chore" }));
        assert_eq!(args.render(PLAIN).as_deref(), Some("Tidy up"));
    }

    #[test]
    fn nothing_to_commit_with() {
        assert_eq!(args(json!({ "type": "feat" })).render(PLAIN), None);
        assert_eq!(args(json!({ "message": "  " })).render(PLAIN), None);
    }
}
