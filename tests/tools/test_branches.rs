//! Tests for branch deletion

use gitmcp_tools::Tool;
use gitmcp_tools::tools::branches::{GitBranchCreateTool, GitBranchDeleteTool, GitBranchSwitchTool};
use serde_json::json;

use crate::common::{ScriptedRunner, context};

#[tokio::test]
async fn test_partial_delete_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git rev-parse --abbrev-ref HEAD", "main\n");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "names": ["topic", "main"] }))?;
    let result = GitBranchDeleteTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    assert_eq!(result.message(), "Deleted 1/2 branches");
    let data = result.data().ok_or("missing data")?;
    assert_eq!(data["successCount"], 1);
    assert_eq!(data["totalCount"], 2);
    assert_eq!(data["results"][1]["error"], "Cannot delete current branch");
    assert!(runner.invoked("git branch -d topic"));
    assert!(!runner.invoked("git branch -d main"));
    Ok(())
}

#[tokio::test]
async fn test_unmerged_branch_needs_force() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git rev-parse --abbrev-ref HEAD", "main\n");
    runner.fail("git branch -d topic", 1, "error: The branch 'topic' is not fully merged.");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "names": ["topic"] }))?;
    let result = GitBranchDeleteTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(result.error().is_some_and(|e| e.contains("not fully merged")));

    let args = serde_json::from_value(json!({ "names": ["topic"], "force": true }))?;
    let result = GitBranchDeleteTool.execute(&ctx, args).await?;
    assert!(result.is_success());
    assert!(runner.invoked("git branch -D topic"));
    Ok(())
}

#[tokio::test]
async fn test_dry_run_checks_existence_only() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git rev-parse --abbrev-ref HEAD", "main\n");
    runner.fail("git rev-parse --verify --quiet refs/heads/gone", 1, "");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "names": ["topic", "gone"], "dryRun": true }))?;
    let result = GitBranchDeleteTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    assert_eq!(result.message(), "Would delete 1/2 branches");
    assert!(!runner.invoked("git branch -"));
    Ok(())
}

#[tokio::test]
async fn test_results_follow_input_order() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git rev-parse --abbrev-ref HEAD", "main\n");
    runner.fail("git branch -d gone", 1, "error: branch 'gone' not found.");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "names": ["gone", "topic", "main"] }))?;
    let result = GitBranchDeleteTool.execute(&ctx, args).await?;

    assert!(result.is_success());
    let results = &result.data().ok_or("missing data")?["results"];
    let order: Vec<_> = (0..3).map(|i| results[i]["branch"].clone()).collect();
    assert_eq!(order, vec![json!("gone"), json!("topic"), json!("main")]);
    assert_eq!(results[0]["success"], false);
    assert_eq!(results[1]["success"], true);
    assert_eq!(results[2]["error"], "Cannot delete current branch");
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_option_like_name() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "-D", "startPoint": "main" }))?;
    let result = GitBranchCreateTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(!runner.invoked("git branch"));

    let args = serde_json::from_value(json!({ "name": "topic", "startPoint": "--delete" }))?;
    let result = GitBranchCreateTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(runner.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_switch_rejects_option_like_name() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "--orphan" }))?;
    let result = GitBranchSwitchTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(!runner.invoked("git checkout"));
    Ok(())
}

#[tokio::test]
async fn test_failed_switch_reports_stashed_changes() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.ok("git status --porcelain", " M src/lib.rs\n");
    runner.fail("git checkout nope", 1, "error: pathspec 'nope' did not match any file(s) known to git");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "nope", "stash": true }))?;
    let result = GitBranchSwitchTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert!(result.message().contains("stash@{0}"));
    assert!(result.error().is_some_and(|e| e.contains("did not match")));
    let data = result.data().ok_or("missing data")?;
    assert_eq!(data["stashed"], true);
    assert_eq!(data["stashRef"], "stash@{0}");
    assert!(runner.invoked("git stash push"));
    Ok(())
}

#[tokio::test]
async fn test_failed_switch_without_stash_has_no_data() -> Result<(), Box<dyn std::error::Error>> {
    let runner = ScriptedRunner::new();
    runner.fail("git checkout nope", 1, "error: pathspec 'nope' did not match any file(s) known to git");
    let ctx = context(&runner);

    let args = serde_json::from_value(json!({ "name": "nope" }))?;
    let result = GitBranchSwitchTool.execute(&ctx, args).await?;

    assert!(!result.is_success());
    assert_eq!(result.message(), "Failed to switch to branch 'nope'");
    assert!(!runner.invoked("git stash"));
    Ok(())
}
