use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{Installation, Program, installation};
use crate::system::PackageManager;
use crate::{SystemDetector, SystemInfo, Tool, ToolContext, ToolResult};

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SystemInfoArgs {}

/// Tool reporting the host platform and installed tooling
#[derive(Clone)]
pub struct SystemInfoTool {
    system: Arc<SystemDetector>,
}

impl SystemInfoTool {
    pub fn new(system: Arc<SystemDetector>) -> Self {
        Self { system }
    }
}

impl Tool for SystemInfoTool {
    type Args = SystemInfoArgs;

    fn name() -> &'static str {
        "system_info"
    }

    fn description() -> &'static str {
        "Get system information: platform, package manager, privileges, and \
         whether Git and the GitKraken CLI are installed."
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, _args: Self::Args) -> anyhow::Result<ToolResult> {
        let info = self.system.system_info().await;
        let git = installation(ctx, &self.system, Program::Git).await;
        let gk = installation(ctx, &self.system, Program::GitKraken).await;
        let recommendations = recommendations(&info, git.installed, gk.installed);

        Ok(ToolResult::success("System information retrieved successfully").with_data(json!({
            "system": info,
            "installations": { "git": git, "gitKrakenCli": gk },
            "recommendations": recommendations,
        })))
    }
}

fn recommendations(info: &SystemInfo, git: bool, gk: bool) -> Vec<&'static str> {
    let mut out = Vec::new();
    let known_manager = info.package_manager != PackageManager::Unknown;

    if !git {
        out.push(if known_manager {
            "Install Git with the install_git tool"
        } else {
            "Install Git manually from https://git-scm.com/downloads"
        });
    }
    if !gk {
        out.push("Install GitKraken CLI with the install_gitkraken_cli tool");
        out.push("GitKraken CLI provides AI-powered commits and visual git workflows");
    }
    if !known_manager {
        out.push("Consider installing a package manager for easier software management");
        match info.platform.as_str() {
            "windows" => out.push("Recommended: Install Chocolatey (https://chocolatey.org/) or Scoop (https://scoop.sh/)"),
            "macos" => out.push("Recommended: Install Homebrew (https://brew.sh/)"),
            _ => {}
        }
    }
    if !info.is_admin && !matches!(info.package_manager, PackageManager::Brew | PackageManager::Scoop) {
        out.push("Some installations may require administrator privileges");
    }
    out
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VerifyTarget {
    Git,
    GitkrakenCli,
    #[default]
    Both,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyInstallationsArgs {
    /// Which tool to verify
    #[serde(default)]
    pub tool: VerifyTarget,
}

/// Tool checking that Git and the GitKraken CLI are usable
#[derive(Clone)]
pub struct VerifyInstallationsTool {
    system: Arc<SystemDetector>,
}

impl VerifyInstallationsTool {
    pub fn new(system: Arc<SystemDetector>) -> Self {
        Self { system }
    }
}

impl Tool for VerifyInstallationsTool {
    type Args = VerifyInstallationsArgs;

    fn name() -> &'static str {
        "verify_installations"
    }

    fn description() -> &'static str {
        "Verify Git and GitKraken CLI installations and suggest next steps"
    }

    fn read_only() -> bool {
        true
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let git = match args.tool {
            VerifyTarget::Git | VerifyTarget::Both => Some(installation(ctx, &self.system, Program::Git).await),
            VerifyTarget::GitkrakenCli => None,
        };
        let gk = match args.tool {
            VerifyTarget::GitkrakenCli | VerifyTarget::Both => {
                Some(installation(ctx, &self.system, Program::GitKraken).await)
            }
            VerifyTarget::Git => None,
        };

        let all_installed = git.iter().chain(gk.iter()).all(|i| i.installed);
        let next_steps = next_steps(git.as_ref(), gk.as_ref());

        let mut verifications = Map::new();
        if let Some(git) = &git {
            verifications.insert("git".to_string(), json!(git));
        }
        if let Some(gk) = &gk {
            verifications.insert("gitKrakenCli".to_string(), json!(gk));
        }

        let info = self.system.system_info().await;
        let message = if all_installed {
            "All requested tools are installed and ready"
        } else {
            "Some tools need installation"
        };
        Ok(ToolResult::success(message).with_data(json!({
            "verifications": Value::Object(verifications),
            "system": {
                "platform": info.platform,
                "packageManager": info.package_manager,
            },
            "nextSteps": next_steps,
        })))
    }
}

fn next_steps(git: Option<&Installation>, gk: Option<&Installation>) -> Vec<&'static str> {
    let mut steps = Vec::new();
    let git_ready = git.is_some_and(|i| i.installed);
    let gk_ready = gk.is_some_and(|i| i.installed);

    if git.is_some() && !git_ready {
        steps.push("Run install_git to install Git");
    }
    if gk.is_some() && !gk_ready {
        steps.push("Run install_gitkraken_cli to install GitKraken CLI");
        steps.push("GitKraken tools appear in the tool list once the CLI is installed");
    }
    if git_ready && gk.is_some() && !gk_ready {
        steps.push("Consider installing GitKraken CLI for AI-powered Git workflows");
    }
    if git_ready && gk_ready {
        steps.push("All tools are ready");
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(pm: PackageManager, platform: &str, admin: bool) -> SystemInfo {
        SystemInfo {
            platform: platform.to_string(),
            arch: "aarch64".to_string(),
            release: "23.1".to_string(),
            package_manager: pm,
            shell: "/bin/zsh".to_string(),
            is_wsl: false,
            is_admin: admin,
        }
    }

    #[test]
    fn missing_manager_suggests_one() {
        let out = recommendations(&host(PackageManager::Unknown, "macos", true), false, true);
        assert_eq!(out[0], "Install Git manually from https://git-scm.com/downloads");
        assert!(out.contains(&"Recommended: Install Homebrew (https://brew.sh/)"));
    }

    #[test]
    fn homebrew_users_are_not_warned_about_privileges() {
        let out = recommendations(&host(PackageManager::Brew, "macos", false), true, true);
        assert!(out.is_empty());
    }

    #[test]
    fn git_only_verification() {
        let git = Installation {
            installed: true,
            version: Some("git version 2.44.0".into()),
            status: "ready",
        };
        assert_eq!(next_steps(Some(&git), None), Vec::<&str>::new());
    }

    #[test]
    fn missing_gitkraken_is_suggested_when_checked() {
        let git = Installation {
            installed: true,
            version: Some("git version 2.44.0".into()),
            status: "ready",
        };
        let gk = Installation {
            installed: false,
            version: None,
            status: "not_installed",
        };
        let steps = next_steps(Some(&git), Some(&gk));
        assert_eq!(steps[0], "Run install_gitkraken_cli to install GitKraken CLI");
        assert!(steps.contains(&"Consider installing GitKraken CLI for AI-powered Git workflows"));
    }
}
