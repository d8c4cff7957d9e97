//! `gitmcp_tools` - Git, GitHub CLI and GitKraken CLI operations as MCP tools
//!
//! Every tool wraps one or more command-line invocations, takes typed
//! arguments and returns a uniform [`ToolResult`]. Tools are grouped into
//! providers, collected into a [`ToolRegistry`] and invoked through the
//! [`Dispatcher`], which also backs the stdio MCP server in [`server`].

use thiserror::Error;

pub mod capability;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod envelope;
pub mod operations;
pub mod provider;
pub mod registry;
pub mod result;
pub mod runner;
pub mod safety;
pub mod server;
pub mod system;
pub mod tool;
pub mod tools;

pub use capability::{CapabilityDetector, CapabilitySnapshot, Feature, FeaturePolicy};
pub use config::{Config, ConfigError};
pub use context::{GitHubAuth, ToolContext};
pub use dispatch::Dispatcher;
pub use envelope::Envelope;
pub use provider::{StaticProvider, ToolProvider};
pub use registry::{Registration, ToolRegistry};
pub use result::{OrFailure, ToolResult};
pub use runner::{CommandLine, CommandOutput, CommandRunner, ProcessRunner, RunError};
pub use safety::{AggregatePolicy, BatchOutcome, Gate, Hazard, SafetyGate};
pub use server::GitServer;
pub use system::{SystemDetector, SystemInfo};
pub use tool::{Annotations, Tool, ToolDescriptor};
pub use tools::{Detectors, catalogue};

/// Dispatch-level failures. Domain failures never appear here; they are
/// `success: false` results.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    NotFound(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidParams { tool: String, message: String },

    #[error("Tool execution failed: {message}")]
    Internal { tool: String, message: String },
}

impl ToolError {
    /// Caller errors are not worth retrying with the same input.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ToolError::NotFound(_) | ToolError::InvalidParams { .. })
    }
}
