//! Scripted command runner shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use gitmcp_tools::{
    CommandLine, CommandOutput, CommandRunner, Config, Detectors, Dispatcher, RunError, ToolContext, catalogue,
};

#[derive(Clone)]
enum Reply {
    Ok(String),
    Exit(i32, String),
    NotFound,
}

struct Rule {
    argv: Vec<String>,
    reply: Reply,
}

/// Replies to commands by argv prefix. The longest matching prefix wins;
/// commands matching no rule succeed with empty output. Every invocation is
/// recorded in display form.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, argv: &str, reply: Reply) {
        let argv = argv.split_whitespace().map(str::to_string).collect();
        self.rules.lock().unwrap().push(Rule { argv, reply });
    }

    /// `argv` succeeds with `stdout`.
    pub fn ok(&self, argv: &str, stdout: &str) {
        self.push(argv, Reply::Ok(stdout.to_string()));
    }

    /// `argv` exits with `code`, writing `stderr`.
    pub fn fail(&self, argv: &str, code: i32, stderr: &str) {
        self.push(argv, Reply::Exit(code, stderr.to_string()));
    }

    /// `program` cannot be started and is not on the path.
    pub fn uninstall(&self, program: &str) {
        self.push(program, Reply::NotFound);
        self.push(&format!("which {program}"), Reply::Exit(1, String::new()));
        self.push(&format!("where {program}"), Reply::Exit(1, String::new()));
    }

    /// Drop every rule mentioning `program`.
    pub fn install(&self, program: &str) {
        self.rules
            .lock()
            .unwrap()
            .retain(|rule| !rule.argv.iter().any(|arg| arg == program));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether any recorded command starts with `prefix`.
    pub fn invoked(&self, prefix: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(prefix))
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(&'a self, command: &'a CommandLine) -> BoxFuture<'a, Result<CommandOutput, RunError>> {
        Box::pin(async move {
            let display = command.display();
            self.calls.lock().unwrap().push(display.clone());

            let argv: Vec<&str> = std::iter::once(command.program.as_str())
                .chain(command.args.iter().map(String::as_str))
                .collect();
            let reply = {
                let rules = self.rules.lock().unwrap();
                rules
                    .iter()
                    .filter(|rule| rule.argv.len() <= argv.len() && rule.argv.iter().zip(&argv).all(|(a, b)| a == b))
                    .max_by_key(|rule| rule.argv.len())
                    .map(|rule| rule.reply.clone())
            };

            match reply {
                None => Ok(CommandOutput::default()),
                Some(Reply::Ok(stdout)) => Ok(CommandOutput::new(stdout, "")),
                Some(Reply::Exit(code, stderr)) => Err(RunError::Exit {
                    command: display,
                    code: Some(code),
                    stdout: String::new(),
                    stderr,
                }),
                Some(Reply::NotFound) => Err(RunError::Spawn {
                    program: command.program.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
                }),
            }
        })
    }
}

/// Context running in a fake directory against `runner`.
pub fn context(runner: &Arc<ScriptedRunner>) -> ToolContext {
    ToolContext::new("/work/repo", Config::default(), runner.clone())
}

/// Dispatcher over the full catalogue, probing through `runner`.
pub async fn dispatcher(runner: &Arc<ScriptedRunner>) -> (Dispatcher, Detectors) {
    let config = Config::default();
    let shared: Arc<dyn CommandRunner> = runner.clone();
    let detectors = Detectors::new(shared.clone(), &config);
    let context = ToolContext::new("/work/repo", config, shared);
    let dispatcher = Dispatcher::new(context, catalogue(&detectors)).await;
    (dispatcher, detectors)
}

/// JSON object arguments from a `json!` literal.
pub fn args(value: serde_json::Value) -> Option<serde_json::Map<String, serde_json::Value>> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        other => panic!("arguments must be an object, got {other}"),
    }
}
