//! Tests for dispatch error taxonomy

use std::sync::Arc;

use gitmcp_tools::tools::GitHubProvider;
use gitmcp_tools::{CapabilityDetector, Dispatcher, StaticProvider, Tool, ToolContext, ToolDescriptor, ToolError, ToolProvider, ToolResult};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::common::{ScriptedRunner, args, context, dispatcher};

#[derive(Deserialize, JsonSchema)]
struct GreetArgs {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    times: u32,
}

fn default_name() -> String {
    "world".to_string()
}

struct Greet;

impl Tool for Greet {
    type Args = GreetArgs;

    fn name() -> &'static str {
        "greet"
    }

    fn description() -> &'static str {
        "Say hello"
    }

    async fn execute(&self, _ctx: &ToolContext, args: GreetArgs) -> anyhow::Result<ToolResult> {
        Ok(ToolResult::success(format!("hello {}", args.name)).with_data(json!({ "times": args.times })))
    }
}

#[derive(Deserialize, JsonSchema)]
struct NoArgs {}

struct GreetLoudly;

impl Tool for GreetLoudly {
    type Args = GreetArgs;

    fn name() -> &'static str {
        "greet"
    }

    fn description() -> &'static str {
        "Say hello, loudly"
    }

    async fn execute(&self, _ctx: &ToolContext, args: GreetArgs) -> anyhow::Result<ToolResult> {
        Ok(ToolResult::success(format!("HELLO {}", args.name.to_uppercase())))
    }
}

struct Explode;

impl Tool for Explode {
    type Args = NoArgs;

    fn name() -> &'static str {
        "explode"
    }

    fn description() -> &'static str {
        "Panics"
    }

    async fn execute(&self, _ctx: &ToolContext, _args: NoArgs) -> anyhow::Result<ToolResult> {
        panic!("index out of bounds");
    }
}

struct Broken;

impl Tool for Broken {
    type Args = NoArgs;

    fn name() -> &'static str {
        "broken"
    }

    fn description() -> &'static str {
        "Returns an error"
    }

    async fn execute(&self, _ctx: &ToolContext, _args: NoArgs) -> anyhow::Result<ToolResult> {
        anyhow::bail!("state file corrupted")
    }
}

async fn fixture() -> (Arc<ScriptedRunner>, Dispatcher) {
    let runner = ScriptedRunner::new();
    let provider: Arc<dyn ToolProvider> = Arc::new(StaticProvider::new(
        "fixture",
        vec![
            ToolDescriptor::new(Greet),
            ToolDescriptor::new(Explode),
            ToolDescriptor::new(Broken),
        ],
    ));
    let dispatcher = Dispatcher::new(context(&runner), vec![provider]).await;
    (runner, dispatcher)
}

#[tokio::test]
async fn test_unknown_tool_is_not_found() {
    let (_, dispatcher) = fixture().await;
    let err = dispatcher.dispatch("git_teleport", None).await.unwrap_err();
    assert!(matches!(err, ToolError::NotFound(ref name) if name == "git_teleport"));
    assert!(err.is_caller_error());
}

#[tokio::test]
async fn test_mistyped_arguments_are_invalid_params() {
    let (_, dispatcher) = fixture().await;
    let err = dispatcher
        .dispatch("greet", args(json!({ "times": "twice" })))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams { ref tool, .. } if tool == "greet"));
}

#[tokio::test]
async fn test_missing_arguments_mean_empty_object() {
    let (_, dispatcher) = fixture().await;
    let result = dispatcher.dispatch("greet", None).await.unwrap();
    assert!(result.is_success());
    assert_eq!(result.message(), "hello world");
}

#[tokio::test]
async fn test_panic_becomes_internal_error() {
    let (_, dispatcher) = fixture().await;
    let err = dispatcher.dispatch("explode", None).await.unwrap_err();
    match err {
        ToolError::Internal { tool, message } => {
            assert_eq!(tool, "explode");
            assert!(message.contains("index out of bounds"));
        }
        other => panic!("expected internal error, got {other:?}"),
    }

    // The dispatcher keeps serving after a panic
    assert!(dispatcher.dispatch("greet", None).await.is_ok());
}

#[tokio::test]
async fn test_tool_error_becomes_internal_error() {
    let (_, dispatcher) = fixture().await;
    let err = dispatcher.dispatch("broken", None).await.unwrap_err();
    assert!(matches!(err, ToolError::Internal { ref message, .. } if message.contains("state file corrupted")));
    assert!(!err.is_caller_error());
}

#[tokio::test]
async fn test_domain_failure_is_a_successful_dispatch() {
    let runner = ScriptedRunner::new();
    let (dispatcher, _) = dispatcher(&runner).await;

    let result = dispatcher
        .dispatch("git_tag_delete", args(json!({ "tags": [] })))
        .await
        .unwrap();
    assert!(!result.is_success());
    assert_eq!(result.message(), "No tags specified for deletion");
}

#[tokio::test]
async fn test_catalogue_names_are_unique() {
    let runner = ScriptedRunner::new();
    let (dispatcher, _) = dispatcher(&runner).await;

    let names: Vec<_> = dispatcher.list().await.iter().map(|t| t.name()).collect();
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(names.len(), unique.len());
    assert_eq!(names.first(), Some(&"git_init"));
}

#[tokio::test]
async fn test_later_provider_wins_and_gated_provider_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.uninstall("gh");
    let quiet: Arc<dyn ToolProvider> = Arc::new(StaticProvider::new("quiet", vec![ToolDescriptor::new(Greet)]));
    let loud: Arc<dyn ToolProvider> = Arc::new(StaticProvider::new("loud", vec![ToolDescriptor::new(GreetLoudly)]));
    let github: Arc<dyn ToolProvider> = Arc::new(GitHubProvider::new(Arc::new(CapabilityDetector::github(
        runner.clone(),
    ))));
    let dispatcher = Dispatcher::new(context(&runner), vec![quiet, loud, github]).await;

    let tools = dispatcher.list().await;
    assert_eq!(tools.iter().map(|t| t.name()).collect::<Vec<_>>(), vec!["greet"]);
    assert_eq!(tools[0].description(), "Say hello, loudly");

    let result = dispatcher.dispatch("greet", args(json!({}))).await?;
    assert!(result.is_success());
    assert_eq!(result.message(), "HELLO WORLD");

    let err = dispatcher.dispatch("nonexistent", args(json!({}))).await.unwrap_err();
    assert!(matches!(err, ToolError::NotFound(_)));
    Ok(())
}
