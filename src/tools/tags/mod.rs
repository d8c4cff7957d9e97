//! Tag management

mod create;
mod delete;
mod list;
mod push;

pub use create::{GitTagArgs, GitTagTool};
pub use delete::{GitTagDeleteArgs, GitTagDeleteTool};
pub use list::{GitTagListArgs, GitTagListTool, TagSort};
pub use push::{GitTagPushArgs, GitTagPushTool};

use crate::{StaticProvider, ToolDescriptor};

pub fn provider() -> StaticProvider {
    StaticProvider::new(
        "tags",
        vec![
            ToolDescriptor::new(GitTagTool),
            ToolDescriptor::new(GitTagListTool),
            ToolDescriptor::new(GitTagDeleteTool),
            ToolDescriptor::new(GitTagPushTool),
        ],
    )
}
