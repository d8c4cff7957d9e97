//! Git output parsing and message formatting
//!
//! Pure functions over command output. The tools in [`crate::tools`] run the
//! commands and hand the text to these parsers.

pub mod blame;
pub mod branch;
pub mod commit_message;
pub mod install;
pub mod log;
pub mod reflog;
pub mod status;
pub mod tag;

pub use blame::{BlameLine, parse_line_porcelain};
pub use branch::{BRANCH_FORMAT, BranchInfo, looks_like_option, parse_branches};
pub use commit_message::{CommitType, ConventionalParts, MessageStyle, decorate_message, format_conventional};
pub use install::{InstallPlan, git_plan, gitkraken_plan};
pub use log::{CommitInfo, LOG_FORMAT, parse_log, short};
pub use reflog::{ReflogEntry, parse_reflog};
pub use status::{FileStatus, WorkingTreeStatus, parse_ahead_behind};
pub use tag::{TAG_FORMAT, TagInfo, TagKind, is_valid_tag_name, parse_tag_info};
