//! Branch management

mod create;
mod delete;
mod list;
mod merge;
mod switch;

pub use create::{GitBranchCreateArgs, GitBranchCreateTool};
pub use delete::{GitBranchDeleteArgs, GitBranchDeleteTool};
pub use list::{GitBranchListArgs, GitBranchListTool};
pub use merge::{GitMergeArgs, GitMergeTool, MergeFastForward, MergeStrategy};
pub use switch::{GitBranchSwitchArgs, GitBranchSwitchTool};

use crate::{StaticProvider, ToolDescriptor};

pub fn provider() -> StaticProvider {
    StaticProvider::new(
        "branches",
        vec![
            ToolDescriptor::new(GitBranchListTool),
            ToolDescriptor::new(GitBranchCreateTool),
            ToolDescriptor::new(GitBranchSwitchTool),
            ToolDescriptor::new(GitBranchDeleteTool),
            ToolDescriptor::new(GitMergeTool),
        ],
    )
}
