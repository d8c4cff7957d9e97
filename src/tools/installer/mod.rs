//! Host inspection and installation of Git and the GitKraken CLI

mod info;
mod install;

use std::sync::Arc;

use serde::Serialize;

pub use info::{SystemInfoTool, VerifyInstallationsTool, VerifyTarget};
pub use install::{InstallGitKrakenCliTool, InstallGitTool};

use crate::{CapabilityDetector, StaticProvider, SystemDetector, ToolContext, ToolDescriptor};

pub fn provider(system: Arc<SystemDetector>, gitkraken: Arc<CapabilityDetector>) -> StaticProvider {
    StaticProvider::new(
        "installer",
        vec![
            ToolDescriptor::new(SystemInfoTool::new(system.clone())),
            ToolDescriptor::new(VerifyInstallationsTool::new(system.clone())),
            ToolDescriptor::new(InstallGitTool::new(system.clone())),
            ToolDescriptor::new(InstallGitKrakenCliTool::new(system, gitkraken)),
        ],
    )
}

/// A program the installers know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Program {
    Git,
    GitKraken,
}

impl Program {
    pub(crate) fn command(self) -> &'static str {
        match self {
            Program::Git => "git",
            Program::GitKraken => "gk",
        }
    }

    pub(crate) fn display_name(self) -> &'static str {
        match self {
            Program::Git => "Git",
            Program::GitKraken => "GitKraken CLI",
        }
    }

    fn version_args(self) -> &'static [&'static str] {
        match self {
            Program::Git => &["--version"],
            Program::GitKraken => &["version"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Installation {
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub status: &'static str,
}

/// Whether `program` is on the path, and what it reports as its version.
pub(crate) async fn installation(ctx: &ToolContext, system: &SystemDetector, program: Program) -> Installation {
    if !system.has_command(program.command()).await {
        return Installation {
            installed: false,
            version: None,
            status: "not_installed",
        };
    }
    let version = ctx
        .exec(program.command(), program.version_args())
        .await
        .ok()
        .map(|out| out.trimmed().to_string())
        .filter(|v| !v.is_empty());
    Installation {
        installed: true,
        version,
        status: "ready",
    }
}
