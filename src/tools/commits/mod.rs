//! Recording and exchanging commits

mod add;
mod commit;
mod fetch;
mod pull;
mod push;
mod stash;

pub use add::{GitAddArgs, GitAddTool};
pub use commit::{GitCommitArgs, GitCommitTool};
pub use fetch::{GitFetchArgs, GitFetchTool};
pub use pull::{FastForward, GitPullArgs, GitPullTool};
pub use push::{GitPushArgs, GitPushTool};
pub use stash::{GitStashArgs, GitStashTool, StashAction};

use crate::{StaticProvider, ToolDescriptor};

pub fn provider() -> StaticProvider {
    StaticProvider::new(
        "commits",
        vec![
            ToolDescriptor::new(GitAddTool),
            ToolDescriptor::new(GitCommitTool),
            ToolDescriptor::new(GitPushTool),
            ToolDescriptor::new(GitPullTool),
            ToolDescriptor::new(GitStashTool),
            ToolDescriptor::new(GitFetchTool),
        ],
    )
}
