//! Server configuration
//!
//! Layered as built-in defaults, then the first configuration file found,
//! then environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::runner::DEFAULT_MAX_PROCESSES;

/// Configuration file names searched in the working directory.
pub const LOCAL_CONFIG_FILES: [&str; 2] = [".gitmcp.json", "gitmcp.config.json"];

/// Configuration file name searched in the home directory.
pub const HOME_CONFIG_FILE: &str = ".gitmcp.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Resolved configuration, read-only once the server starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Remote used when a tool is not told which one to talk to.
    pub default_remote: String,
    /// Apply conventional commit formatting in `git_commit`.
    pub auto_commit_conventions: bool,
    /// Prefix commit subjects with a gitmoji.
    pub gitmojis: bool,
    /// Token forwarded to the GitHub CLI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    /// Ceiling on concurrently running external processes.
    pub max_concurrent_processes: usize,
    /// Probe each GitKraken sub-command instead of assuming all are present.
    pub gitkraken_feature_probe: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_remote: "origin".to_string(),
            auto_commit_conventions: true,
            gitmojis: true,
            github_token: None,
            max_concurrent_processes: DEFAULT_MAX_PROCESSES,
            gitkraken_feature_probe: false,
        }
    }
}

impl Config {
    /// Load from the standard search locations relative to `cwd`, then apply
    /// the process environment.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let mut candidates: Vec<PathBuf> = LOCAL_CONFIG_FILES.iter().map(|f| cwd.join(f)).collect();
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(HOME_CONFIG_FILE));
        }
        Self::load_from(&candidates, |key| std::env::var(key).ok())
    }

    /// Load from the first existing file in `candidates`, then apply variables
    /// returned by `env`.
    pub fn load_from(
        candidates: &[PathBuf],
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match candidates.iter().find(|path| path.is_file()) {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env(env);
        Ok(config)
    }

    /// Load `path`, which must exist, then apply the process environment.
    pub fn load_explicit(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(token) = env("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.github_token = Some(token);
        }
        if let Some(remote) = env("GIT_DEFAULT_REMOTE") {
            self.default_remote = remote;
        }
        if let Some(flag) = env("GIT_AUTO_CONVENTIONS") {
            self.auto_commit_conventions = flag == "true";
        }
        if let Some(flag) = env("GIT_GITMOJIS") {
            self.gitmojis = flag == "true";
        }
        if let Some(max) = env("GITMCP_MAX_PROCESSES") {
            match max.parse() {
                Ok(max) => self.max_concurrent_processes = max,
                Err(_) => log::warn!("Ignoring GITMCP_MAX_PROCESSES={max}: not a number"),
            }
        }
    }

    /// Every problem with this configuration. Empty when valid.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.default_remote.trim().is_empty() {
            problems.push("defaultRemote must not be empty".to_string());
        }
        if self.max_concurrent_processes == 0 {
            problems.push("maxConcurrentProcesses must be at least 1".to_string());
        }
        if matches!(&self.github_token, Some(token) if token.trim().is_empty()) {
            problems.push("githubToken must not be blank".to_string());
        }
        problems
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems))
        }
    }

    /// Copy safe to print: the GitHub token is masked.
    pub fn redacted(&self) -> Self {
        Self {
            github_token: self.github_token.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}
