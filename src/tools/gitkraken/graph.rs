use schemars::JsonSchema;
use serde::Deserialize;

use super::gk_output;
use crate::{OrFailure, Tool, ToolContext, ToolResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GraphPosition {
    Top,
    Bottom,
    Left,
    #[default]
    Right,
}

impl GraphPosition {
    fn flag(self) -> &'static str {
        match self {
            GraphPosition::Top => "--top",
            GraphPosition::Bottom => "--bottom",
            GraphPosition::Left => "--left",
            GraphPosition::Right => "--right",
        }
    }
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GkGraphArgs {
    /// Branch to visualize
    #[serde(default)]
    pub branch: Option<String>,
    /// Number of commits to show
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Where the graph panel opens
    #[serde(default)]
    pub position: GraphPosition,
}

#[derive(Clone)]
pub struct GkGraphTool;

impl Tool for GkGraphTool {
    type Args = GkGraphArgs;

    fn name() -> &'static str {
        "gk_graph"
    }

    fn description() -> &'static str {
        "Display interactive commit graph visualization using GitKraken CLI"
    }

    fn read_only() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let mut cmd = vec!["graph".to_string()];
        if let Some(branch) = &args.branch {
            cmd.extend(["--branch".to_string(), branch.clone()]);
        }
        cmd.extend(["--limit".to_string(), args.limit.to_string()]);
        cmd.push(args.position.flag().to_string());

        let outcome = gk_output(ctx, &cmd)
            .await
            .map(|data| ToolResult::success("Commit graph visualization opened").with_data(data));
        Ok(outcome.or_failure("Failed to display commit graph"))
    }
}
