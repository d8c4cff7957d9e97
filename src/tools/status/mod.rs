//! Read-only inspection: status, history, diffs, blame

mod blame;
mod diff;
mod log;
mod show;
mod status;

pub use blame::{GitBlameArgs, GitBlameTool};
pub use diff::{DiffTarget, GitDiffArgs, GitDiffTool};
pub use log::{GitLogArgs, GitLogTool};
pub use show::{GitShowArgs, GitShowTool};
pub use status::{GitStatusArgs, GitStatusTool};

use crate::{StaticProvider, ToolDescriptor};

pub fn provider() -> StaticProvider {
    StaticProvider::new(
        "status",
        vec![
            ToolDescriptor::new(GitStatusTool),
            ToolDescriptor::new(GitLogTool),
            ToolDescriptor::new(GitDiffTool),
            ToolDescriptor::new(GitBlameTool),
            ToolDescriptor::new(GitShowTool),
        ],
    )
}
