//! Tests for the protocol rendering of dispatch results

use gitmcp_tools::Envelope;
use gitmcp_tools::server::to_mcp_tool;
use rmcp::model::CallToolResult;
use serde_json::{Value, json};

use crate::common::{ScriptedRunner, args, dispatcher};

#[tokio::test]
async fn test_refusal_renders_as_error_result() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git status --porcelain", " M README.md\n");
    let (dispatcher, _) = dispatcher(&runner).await;

    let result = dispatcher
        .dispatch("git_reset", args(json!({ "mode": "hard" })))
        .await?;
    let envelope = Envelope::from_result(&result);
    assert!(envelope.is_error);
    assert!(envelope.summary().starts_with("✗ Hard reset would lose uncommitted changes"));

    let payload: Value = serde_json::from_str(&envelope.blocks[1])?;
    assert_eq!(payload["success"], false);
    assert_eq!(payload["error"], "Uncommitted changes detected");

    let call: CallToolResult = envelope.into();
    assert_eq!(call.is_error, Some(true));
    assert_eq!(call.content.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_success_renders_data_block() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git rev-parse --abbrev-ref HEAD", "main\n");
    let (dispatcher, _) = dispatcher(&runner).await;

    let result = dispatcher
        .dispatch("git_branch_delete", args(json!({ "names": ["topic"] })))
        .await?;
    let envelope = Envelope::from_result(&result);
    assert!(!envelope.is_error);

    let payload: Value = serde_json::from_str(&envelope.blocks[1])?;
    assert_eq!(payload["data"]["successCount"], 1);

    let call: CallToolResult = envelope.into();
    assert_ne!(call.is_error, Some(true));
    Ok(())
}

#[tokio::test]
async fn test_listed_tools_carry_hints() {
    let runner = ScriptedRunner::new();
    let (dispatcher, _) = dispatcher(&runner).await;
    let tools = dispatcher.list().await;

    let reset = tools.iter().find(|t| t.name() == "git_reset").map(to_mcp_tool).unwrap();
    let hints = reset.annotations.unwrap();
    assert_eq!(hints.destructive_hint, Some(true));
    assert_eq!(hints.read_only_hint, Some(false));

    let status = tools.iter().find(|t| t.name() == "git_status").map(to_mcp_tool).unwrap();
    assert_eq!(status.annotations.unwrap().read_only_hint, Some(true));
    assert_eq!(status.input_schema.get("type"), Some(&json!("object")));
}
