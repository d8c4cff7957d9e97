//! Tests for tag creation and deletion

use gitmcp_tools::Tool;
use gitmcp_tools::tools::tags::{GitTagDeleteTool, GitTagTool};
use serde_json::json;

use crate::common::{ScriptedRunner, context};

#[tokio::test]
async fn test_delete_reports_missing_tags_separately() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git rev-parse --verify --quiet refs/tags/ghost", 1, "");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "tags": ["v1.0.0", "ghost"] }))?;
    let result = GitTagDeleteTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    assert_eq!(result.message(), "Deleted 1 of 1 tags");
    let data = result.data().ok_or("missing data")?;
    assert_eq!(data["deleted"], json!(["v1.0.0"]));
    assert_eq!(data["nonExistent"], json!(["ghost"]));
    assert_eq!(data["total"], 2);
    assert!(runner.invoked("git tag --delete v1.0.0"));
    assert!(!runner.invoked("git tag --delete ghost"));
    Ok(())
}

#[tokio::test]
async fn test_delete_fails_when_any_existing_tag_fails() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git tag --delete v2", 1, "error: could not lock ref");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "tags": ["v1", "v2"] }))?;
    let result = GitTagDeleteTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    let data = result.data().ok_or("missing data")?;
    assert_eq!(data["successful"], 1);
    assert_eq!(data["deleted"], json!(["v1"]));
    assert_eq!(data["failed"][0]["target"], "v2");
    assert!(result.error().is_some_and(|e| e.contains("v2")));
    Ok(())
}

#[tokio::test]
async fn test_delete_refuses_when_nothing_exists() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git rev-parse --verify --quiet", 1, "");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "tags": ["a", "b"] }))?;
    let result = GitTagDeleteTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.message(), "None of the specified tags exist");
    assert!(!runner.invoked("git tag --delete"));
    Ok(())
}

#[tokio::test]
async fn test_create_refuses_existing_tag() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "v1.0.0" }))?;
    let result = GitTagTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("Tag already exists"));
    assert!(!runner.invoked("git tag v1.0.0"));
    Ok(())
}

#[tokio::test]
async fn test_create_annotated_tag() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git rev-parse --verify --quiet refs/tags/v1.1.0", 1, "");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "v1.1.0", "message": "Second release" }))?;
    let result = GitTagTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    assert!(runner.invoked("git tag --annotate --message Second release v1.1.0"));
    assert_eq!(result.data().ok_or("missing data")?["type"], "annotated");
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_invalid_name() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "bad tag!" }))?;
    let result = GitTagTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(runner.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_option_like_name() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "-d", "commit": "v1.0.0" }))?;
    let result = GitTagTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("Invalid tag name format"));
    assert!(!runner.invoked("git tag"));
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_option_like_commit() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "v2.0.0", "commit": "--delete" }))?;
    let result = GitTagTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(runner.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dry_run_over_missing_tags_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git rev-parse --verify --quiet refs/tags/ghost", 1, "");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "tags": ["ghost"], "dryRun": true }))?;
    let result = GitTagDeleteTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.message(), "None of the specified tags exist");
    assert_eq!(result.error(), Some("No valid tags found"));
    assert_eq!(result.data().ok_or("missing data")?["nonExistentTags"], json!(["ghost"]));
    assert!(!runner.invoked("git tag --delete"));
    Ok(())
}

#[tokio::test]
async fn test_dry_run_previews_existing_tags() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git rev-parse --verify --quiet refs/tags/ghost", 1, "");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "tags": ["v1", "ghost"], "dryRun": true }))?;
    let result = GitTagDeleteTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    let data = result.data().ok_or("missing data")?;
    assert_eq!(data["wouldDelete"], json!(["v1"]));
    assert_eq!(data["dryRun"], true);
    assert!(!runner.invoked("git tag --delete"));
    Ok(())
}
