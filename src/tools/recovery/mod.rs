//! Undoing and discarding work

mod clean;
mod reflog;
mod reset;
mod revert;

pub use clean::{GitCleanArgs, GitCleanTool};
pub use reflog::{GitReflogArgs, GitReflogTool, ReflogAction};
pub use reset::{GitResetArgs, GitResetTool, ResetMode};
pub use revert::{GitRevertArgs, GitRevertTool};

use crate::{StaticProvider, ToolDescriptor};

pub fn provider() -> StaticProvider {
    StaticProvider::new(
        "recovery",
        vec![
            ToolDescriptor::new(GitResetTool),
            ToolDescriptor::new(GitRevertTool),
            ToolDescriptor::new(GitReflogTool),
            ToolDescriptor::new(GitCleanTool),
        ],
    )
}
