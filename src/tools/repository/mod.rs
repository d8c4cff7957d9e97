//! Repository setup: init, clone, remotes and configuration

mod clone;
mod config;
mod init;
mod remote;

pub use clone::{GitCloneArgs, GitCloneTool};
pub use config::{ConfigAction, GitConfigArgs, GitConfigTool};
pub use init::{GitInitArgs, GitInitTool};
pub use remote::{GitRemoteArgs, GitRemoteTool, RemoteAction};

use crate::{StaticProvider, ToolDescriptor};

pub fn provider() -> StaticProvider {
    StaticProvider::new(
        "repository",
        vec![
            ToolDescriptor::new(GitInitTool),
            ToolDescriptor::new(GitCloneTool),
            ToolDescriptor::new(GitRemoteTool),
            ToolDescriptor::new(GitConfigTool),
        ],
    )
}
