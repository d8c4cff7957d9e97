//! External process execution
//!
//! Every Git, GitHub CLI and GitKraken CLI invocation goes through a
//! [`CommandRunner`]. The production implementation spawns real processes
//! with a fixed concurrency ceiling; tests substitute a scripted runner.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::process::Command;
use tokio::sync::Semaphore;

/// Default number of external processes allowed to run at once.
pub const DEFAULT_MAX_PROCESSES: usize = 6;

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: BTreeMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Program followed by its arguments, space separated. Used for logs and previews.
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(arg);
        }
        out
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Captured output of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Non-empty stdout lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().filter(|line| !line.trim().is_empty())
    }
}

/// Process-level failures.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {}", exit_label(*code), detail(stderr, stdout))]
    Exit {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("process pool closed")]
    PoolClosed,
}

impl RunError {
    /// Stderr of a failed command, or stdout when stderr is empty.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunError::Exit { stdout, stderr, .. } => {
                if stderr.trim().is_empty() {
                    Some(stdout.as_str())
                } else {
                    Some(stderr.as_str())
                }
            }
            _ => None,
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

fn detail<'a>(stderr: &'a str, stdout: &'a str) -> &'a str {
    let stderr = stderr.trim();
    if stderr.is_empty() { stdout.trim() } else { stderr }
}

/// Capability to execute external programs.
///
/// Implementations fail with [`RunError::Exit`] on a non-zero exit status;
/// callers decide whether a particular exit is a domain failure.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(&'a self, command: &'a CommandLine) -> BoxFuture<'a, Result<CommandOutput, RunError>>;
}

/// Spawns real processes, at most `max_processes` at a time.
///
/// Requests above the ceiling wait for a permit instead of failing.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    permits: Arc<Semaphore>,
}

impl ProcessRunner {
    pub fn new(max_processes: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_processes.max(1))),
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PROCESSES)
    }
}

impl CommandRunner for ProcessRunner {
    fn run<'a>(&'a self, command: &'a CommandLine) -> BoxFuture<'a, Result<CommandOutput, RunError>> {
        Box::pin(async move {
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| RunError::PoolClosed)?;

            log::debug!("spawning `{command}`");

            let mut cmd = Command::new(&command.program);
            cmd.args(&command.args).envs(&command.env).kill_on_drop(true);
            if let Some(dir) = &command.current_dir {
                cmd.current_dir(dir);
            }

            let output = cmd.output().await.map_err(|source| RunError::Spawn {
                program: command.program.clone(),
                source,
            })?;

            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

            if !output.status.success() {
                return Err(RunError::Exit {
                    command: command.display(),
                    code: output.status.code(),
                    stdout,
                    stderr,
                });
            }

            Ok(CommandOutput { stdout, stderr })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_display_joins_arguments() {
        let cmd = CommandLine::new("git").args(["reset", "--hard"]).arg("HEAD~1");
        assert_eq!(cmd.display(), "git reset --hard HEAD~1");
    }

    #[test]
    fn exit_error_prefers_stderr() {
        let err = RunError::Exit {
            command: "git merge topic".to_string(),
            code: Some(1),
            stdout: "CONFLICT (content)".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.output(), Some("CONFLICT (content)"));
        assert_eq!(err.exit_code(), Some(1));
        assert!(err.to_string().contains("status 1"));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let runner = ProcessRunner::new(1);
        let cmd = CommandLine::new("definitely-not-a-real-binary-7f3a");
        let err = runner.run(&cmd).await.err();
        assert!(matches!(err, Some(RunError::Spawn { .. })));
    }
}
