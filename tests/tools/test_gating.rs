//! Tests for capability-gated providers

use crate::common::{ScriptedRunner, dispatcher};

async fn names(dispatcher: &gitmcp_tools::Dispatcher) -> Vec<&'static str> {
    dispatcher.list().await.iter().map(|t| t.name()).collect()
}

#[tokio::test]
async fn test_missing_gh_hides_github_tools() {
    let runner = ScriptedRunner::new();
    runner.uninstall("gh");
    let (dispatcher, _) = dispatcher(&runner).await;

    let names = names(&dispatcher).await;
    assert!(!names.iter().any(|n| n.starts_with("gh_")));
    assert!(names.contains(&"git_status"));
    assert!(names.contains(&"gk_graph"));
}

#[tokio::test]
async fn test_installed_gh_exposes_github_tools() {
    let runner = ScriptedRunner::new();
    runner.ok("gh version", "gh version 2.45.0 (2024-03-04)\n");
    let (dispatcher, _) = dispatcher(&runner).await;

    let names = names(&dispatcher).await;
    assert!(names.contains(&"gh_pr_create"));
    assert!(names.contains(&"gh_repo_info"));
}

#[tokio::test]
async fn test_gitkraken_tools_appear_after_reset() {
    let runner = ScriptedRunner::new();
    runner.uninstall("gk");
    let (dispatcher, detectors) = dispatcher(&runner).await;

    assert!(!names(&dispatcher).await.iter().any(|n| n.starts_with("gk_")));
    assert!(names(&dispatcher).await.contains(&"install_gitkraken_cli"));

    runner.install("gk");
    // The cached probe still says unavailable
    assert!(!names(&dispatcher).await.contains(&"gk_graph"));

    detectors.gitkraken.reset_cache().await;
    let names = names(&dispatcher).await;
    assert!(names.contains(&"gk_graph"));
    assert!(names.contains(&"gk_work_commit_ai"));
}

#[tokio::test]
async fn test_unknown_gk_tool_resolves_after_reset() {
    let runner = ScriptedRunner::new();
    runner.uninstall("gk");
    let (dispatcher, detectors) = dispatcher(&runner).await;
    assert!(dispatcher.lookup("gk_work_list").await.is_none());

    runner.install("gk");
    detectors.gitkraken.reset_cache().await;
    assert!(dispatcher.lookup("gk_work_list").await.is_some());
}
