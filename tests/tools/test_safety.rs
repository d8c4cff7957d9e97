//! Tests for dry-run and force handling of destructive tools

use gitmcp_tools::Tool;
use gitmcp_tools::tools::recovery::{GitCleanTool, GitResetTool};
use serde_json::json;

use crate::common::{ScriptedRunner, context};

#[tokio::test]
async fn test_hard_reset_refuses_dirty_tree() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git status --porcelain", " M src/lib.rs\n?? notes.txt\n");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "mode": "hard", "target": "HEAD~1" }))?;
    let result = GitResetTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("Uncommitted changes detected"));
    let files = &result.data().ok_or("missing data")?["uncommittedFiles"];
    assert_eq!(files.as_array().map(Vec::len), Some(2));
    assert!(!runner.invoked("git reset"));
    Ok(())
}

#[tokio::test]
async fn test_forced_hard_reset_runs() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git status --porcelain", " M src/lib.rs\n");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "mode": "hard", "target": "HEAD~1", "force": true }))?;
    let result = GitResetTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    assert_eq!(result.message(), "Reset hard completed successfully");
    assert!(runner.invoked("git reset --hard HEAD~1"));
    Ok(())
}

#[tokio::test]
async fn test_reset_dry_run_invokes_nothing_mutating() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git status --porcelain", " M src/lib.rs\n");
    runner.ok("git rev-parse HEAD", "0123456789abcdef0123456789abcdef01234567\n");
    runner.ok("git rev-parse HEAD~1", "fedcba9876543210fedcba9876543210fedcba98\n");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "mode": "hard", "target": "HEAD~1", "dryRun": true }))?;
    let result = GitResetTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    let data = result.data().ok_or("missing data")?;
    assert_eq!(data["dryRun"], true);
    assert!(data["preview"].is_string());
    assert!(!runner.invoked("git reset"));
    Ok(())
}

#[tokio::test]
async fn test_clean_defaults_to_preview() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git clean -n", "Would remove build.log\nWould remove tmp/\n");
    let ctx = context(&runner);

    let result = GitCleanTool.execute(&ctx, serde_json::from_value(json!({}))?).await?;

    assert!(result.is_success());
    assert_eq!(result.message(), "Clean completed: 2 files would be removed");
    assert!(!runner.invoked("git clean -f"));
    Ok(())
}

#[tokio::test]
async fn test_clean_without_force_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git clean -n", "Would remove build.log\n");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "dryRun": false }))?;
    let result = GitCleanTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.error(), Some("Safety check: force flag required"));
    assert_eq!(result.data().ok_or("missing data")?["wouldRemove"], json!(["build.log"]));
    assert!(!runner.invoked("git clean -f"));
    Ok(())
}

#[tokio::test]
async fn test_clean_with_force_removes() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git clean -f", "Removing build.log\n");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "dryRun": false, "force": true, "directories": true }))?;
    let result = GitCleanTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    assert!(runner.invoked("git clean -f -d"));
    assert_eq!(result.data().ok_or("missing data")?["files"], json!(["build.log"]));
    Ok(())
}
