//! Tests for configuration layering

use std::collections::HashMap;

use gitmcp_tools::{Config, ConfigError};
use tempfile::TempDir;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults_without_file_or_env() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = Config::load_from(&[dir.path().join(".gitmcp.json")], env(&[]))?;
    assert_eq!(config, Config::default());
    assert_eq!(config.default_remote, "origin");
    assert_eq!(config.max_concurrent_processes, 6);
    Ok(())
}

#[test]
fn test_env_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join(".gitmcp.json");
    std::fs::write(&path, r#"{ "defaultRemote": "upstream", "gitmojis": false, "maxConcurrentProcesses": 2 }"#)?;

    let config = Config::load_from(
        &[path],
        env(&[("GIT_GITMOJIS", "true"), ("GITHUB_TOKEN", "ghp_example")]),
    )?;

    assert_eq!(config.default_remote, "upstream");
    assert_eq!(config.max_concurrent_processes, 2);
    assert!(config.gitmojis);
    assert!(config.auto_commit_conventions);
    assert_eq!(config.github_token.as_deref(), Some("ghp_example"));
    Ok(())
}

#[test]
fn test_first_existing_file_wins() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let second = dir.path().join("gitmcp.config.json");
    std::fs::write(&second, r#"{ "defaultRemote": "fork" }"#)?;

    let config = Config::load_from(&[dir.path().join(".gitmcp.json"), second], env(&[]))?;
    assert_eq!(config.default_remote, "fork");
    Ok(())
}

#[test]
fn test_malformed_file_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join(".gitmcp.json");
    std::fs::write(&path, "{ not json")?;

    let err = Config::load_from(&[path.clone()], env(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { path: ref p, .. } if p == &path));
    Ok(())
}

#[test]
fn test_unparsable_process_limit_is_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let config = Config::load_from(&[dir.path().join("none.json")], env(&[("GITMCP_MAX_PROCESSES", "lots")]))?;
    assert_eq!(config.max_concurrent_processes, 6);
    Ok(())
}

#[test]
fn test_validate_lists_every_problem() {
    let config = Config {
        default_remote: " ".to_string(),
        max_concurrent_processes: 0,
        ..Config::default()
    };
    match config.validate() {
        Err(ConfigError::Invalid(problems)) => assert_eq!(problems.len(), 2),
        other => panic!("expected invalid configuration, got {other:?}"),
    }
}

#[test]
fn test_redacted_masks_token() {
    let config = Config {
        github_token: Some("ghp_secret".to_string()),
        ..Config::default()
    };
    let shown = serde_json::to_string(&config.redacted()).unwrap();
    assert!(!shown.contains("ghp_secret"));
    assert!(shown.contains("\"githubToken\":\"***\""));
}
