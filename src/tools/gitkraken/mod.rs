//! GitKraken CLI tools
//!
//! Which tools appear depends on the `gk` detector's feature snapshot:
//! graph, workflow + ai, and workspace each unlock their own tools.

mod graph;
mod work;
mod workspace;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::Value;

pub use graph::{GkGraphTool, GraphPosition};
pub use work::{GkSetupTool, GkWorkCommitAiTool, GkWorkListTool, GkWorkPrCreateAiTool, WorkStatus};
pub use workspace::{GkWorkspaceCreateTool, GkWorkspaceListTool};

use crate::{CapabilityDetector, CapabilitySnapshot, RunError, ToolContext, ToolDescriptor, ToolProvider};

/// Provider gated on the `gk` binary and its sub-features.
pub struct GitKrakenProvider {
    detector: Arc<CapabilityDetector>,
}

impl GitKrakenProvider {
    pub fn new(detector: Arc<CapabilityDetector>) -> Self {
        Self { detector }
    }
}

/// Tools unlocked by `snapshot`.
pub fn tools_for(snapshot: &CapabilitySnapshot) -> Vec<ToolDescriptor> {
    if !snapshot.available {
        return Vec::new();
    }

    let mut tools = Vec::new();
    if snapshot.has("graph") {
        tools.push(ToolDescriptor::new(GkGraphTool));
    }
    if snapshot.has("workflow") && snapshot.has("ai") {
        tools.push(ToolDescriptor::new(GkWorkCommitAiTool));
        tools.push(ToolDescriptor::new(GkWorkPrCreateAiTool));
    }
    if snapshot.has("workspace") {
        tools.push(ToolDescriptor::new(GkWorkspaceListTool));
        tools.push(ToolDescriptor::new(GkWorkspaceCreateTool));
    }
    tools.push(ToolDescriptor::new(GkWorkListTool));
    tools.push(ToolDescriptor::new(GkSetupTool));
    tools
}

impl ToolProvider for GitKrakenProvider {
    fn name(&self) -> &'static str {
        "gitkraken"
    }

    fn tools(&self) -> BoxFuture<'_, Vec<ToolDescriptor>> {
        Box::pin(async move {
            let snapshot = self.detector.capabilities().await;
            if !snapshot.available {
                log::info!("GitKraken CLI not found, skipping GitKraken tools");
            }
            tools_for(&snapshot)
        })
    }

    fn detectors(&self) -> Vec<Arc<CapabilityDetector>> {
        vec![self.detector.clone()]
    }
}

/// Run `gk` and decode stdout as JSON, falling back to the trimmed text.
pub(crate) async fn gk_output(ctx: &ToolContext, args: &[String]) -> Result<Value, RunError> {
    let output = ctx.exec("gk", args).await?;
    let text = output.trimmed();
    Ok(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn snapshot(features: &[(&str, bool)]) -> CapabilitySnapshot {
        CapabilitySnapshot {
            available: true,
            version: Some("2.1.0".into()),
            features: features
                .iter()
                .map(|(name, on)| (name.to_string(), *on))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    fn names(tools: &[ToolDescriptor]) -> Vec<&'static str> {
        tools.iter().map(ToolDescriptor::name).collect()
    }

    #[test]
    fn unavailable_binary_yields_nothing() {
        assert!(tools_for(&CapabilitySnapshot::default()).is_empty());
    }

    #[test]
    fn ai_tools_need_workflow_and_ai() {
        let tools = tools_for(&snapshot(&[("graph", true), ("workflow", true), ("ai", false)]));
        assert_eq!(names(&tools), vec!["gk_graph", "gk_work_list", "gk_setup"]);
    }

    #[test]
    fn full_feature_set() {
        let tools = tools_for(&snapshot(&[
            ("graph", true),
            ("workflow", true),
            ("workspace", true),
            ("ai", true),
        ]));
        assert_eq!(tools.len(), 7);
    }
}
