//! GitHub CLI tools
//!
//! Present only when the `gh` binary is found. Every tool shells out to `gh`
//! with the configured token and returns its JSON output as `data`.

mod issues;
mod pulls;
mod releases;
mod repo;
mod workflows;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

pub use issues::{GhIssueCreateTool, GhIssueListTool, GhIssueViewTool};
pub use pulls::{GhPrCreateTool, GhPrListTool, GhPrViewTool};
pub use releases::GhReleaseListTool;
pub use repo::GhRepoInfoTool;
pub use workflows::GhWorkflowRunTool;

use crate::{CapabilityDetector, RunError, ToolContext, ToolDescriptor, ToolProvider};

/// Provider gated on the `gh` binary.
pub struct GitHubProvider {
    detector: Arc<CapabilityDetector>,
}

impl GitHubProvider {
    pub fn new(detector: Arc<CapabilityDetector>) -> Self {
        Self { detector }
    }
}

impl ToolProvider for GitHubProvider {
    fn name(&self) -> &'static str {
        "github"
    }

    fn tools(&self) -> BoxFuture<'_, Vec<ToolDescriptor>> {
        Box::pin(async move {
            if !self.detector.is_available().await {
                log::info!("GitHub CLI not found, skipping GitHub tools");
                return Vec::new();
            }
            vec![
                ToolDescriptor::new(GhRepoInfoTool),
                ToolDescriptor::new(GhIssueListTool),
                ToolDescriptor::new(GhIssueCreateTool),
                ToolDescriptor::new(GhIssueViewTool),
                ToolDescriptor::new(GhPrListTool),
                ToolDescriptor::new(GhPrCreateTool),
                ToolDescriptor::new(GhPrViewTool),
                ToolDescriptor::new(GhWorkflowRunTool),
                ToolDescriptor::new(GhReleaseListTool),
            ]
        })
    }

    fn detectors(&self) -> Vec<Arc<CapabilityDetector>> {
        vec![self.detector.clone()]
    }
}

/// Run `gh` and decode stdout as JSON, falling back to the trimmed text.
pub(crate) async fn gh_output(ctx: &ToolContext, args: &[String]) -> Result<Value, RunError> {
    let output = ctx.gh(args).await?;
    Ok(parse_output(output.trimmed()))
}

pub(crate) fn parse_output(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Number of elements when `data` is an array.
pub(crate) fn count(data: &Value) -> usize {
    data.as_array().map_or(0, Vec::len)
}

/// `--repo owner/name` when a repository was named.
pub(crate) fn repo_flag(cmd: &mut Vec<String>, repo: &Option<String>) {
    if let Some(repo) = repo {
        cmd.extend(["--repo".to_string(), repo.clone()]);
    }
}

pub(crate) fn default_state() -> String {
    "open".to_string()
}

pub(crate) fn default_limit() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_output_is_decoded() {
        assert_eq!(count(&parse_output(r#"[{"number":1},{"number":2}]"#)), 2);
        assert_eq!(
            parse_output("https://github.com/o/r/issues/7"),
            Value::String("https://github.com/o/r/issues/7".into())
        );
    }
}
