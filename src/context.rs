//! Shared collaborators handed to every tool invocation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::operations::WorkingTreeStatus;
use crate::runner::{CommandLine, CommandOutput, CommandRunner, RunError};

/// Credentials for the GitHub CLI.
#[derive(Clone)]
pub struct GitHubAuth {
    token: String,
}

impl GitHubAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for GitHubAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuth").field("token", &"***").finish()
    }
}

/// Execution context passed by reference into every tool.
///
/// Cheap to clone; tools only read from it.
#[derive(Clone)]
pub struct ToolContext {
    working_directory: PathBuf,
    config: Arc<Config>,
    runner: Arc<dyn CommandRunner>,
    github: Option<GitHubAuth>,
}

impl ToolContext {
    pub fn new(working_directory: impl Into<PathBuf>, config: Config, runner: Arc<dyn CommandRunner>) -> Self {
        let github = config.github_token.clone().map(GitHubAuth::new);
        Self {
            working_directory: working_directory.into(),
            config: Arc::new(config),
            runner,
            github,
        }
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &Arc<dyn CommandRunner> {
        &self.runner
    }

    pub fn github(&self) -> Option<&GitHubAuth> {
        self.github.as_ref()
    }

    /// Run `git` with `args` in the working directory.
    pub async fn git<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandOutput, RunError> {
        let cmd = CommandLine::new("git")
            .args(args.iter().map(|a| a.as_ref().to_string()))
            .current_dir(&self.working_directory);
        self.runner.run(&cmd).await
    }

    /// Run the GitHub CLI, forwarding the configured token.
    pub async fn gh<S: AsRef<str>>(&self, args: &[S]) -> Result<CommandOutput, RunError> {
        let mut cmd = CommandLine::new("gh")
            .args(args.iter().map(|a| a.as_ref().to_string()))
            .current_dir(&self.working_directory);
        if let Some(auth) = &self.github {
            cmd = cmd.env("GH_TOKEN", auth.token());
        }
        self.runner.run(&cmd).await
    }

    /// Run an arbitrary program in the working directory.
    pub async fn exec<S: AsRef<str>>(&self, program: &str, args: &[S]) -> Result<CommandOutput, RunError> {
        let cmd = CommandLine::new(program)
            .args(args.iter().map(|a| a.as_ref().to_string()))
            .current_dir(&self.working_directory);
        self.runner.run(&cmd).await
    }

    /// Current branch name, `HEAD` when detached.
    pub async fn current_branch(&self) -> Result<String, RunError> {
        Ok(self
            .git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .await?
            .trimmed()
            .to_string())
    }

    /// Full object id of `rev`.
    pub async fn rev_parse(&self, rev: &str) -> Result<String, RunError> {
        Ok(self.git(&["rev-parse", rev]).await?.trimmed().to_string())
    }

    /// Whether `reference` resolves, e.g. `refs/tags/v1.0`.
    pub async fn ref_exists(&self, reference: &str) -> bool {
        self.git(&["rev-parse", "--verify", "--quiet", reference])
            .await
            .is_ok()
    }

    /// Porcelain status of the working tree. Branch and tracking counts are
    /// not filled in.
    pub async fn working_tree(&self) -> Result<WorkingTreeStatus, RunError> {
        let output = self.git(&["status", "--porcelain"]).await?;
        Ok(WorkingTreeStatus::parse_porcelain(&output.stdout))
    }
}
