use std::sync::Arc;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::{Program, installation};
use crate::operations::install::GITKRAKEN_RELEASES_URL;
use crate::operations::{InstallPlan, git_plan, gitkraken_plan};
use crate::result::error_text;
use crate::{CapabilityDetector, SystemDetector, SystemInfo, Tool, ToolContext, ToolResult};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallArgs {
    /// Reinstall even when already installed
    #[serde(default)]
    pub force: bool,
    /// Show the installation commands without running them
    #[serde(default)]
    pub dry_run: bool,
}

/// Tool installing Git through the host package manager
#[derive(Clone)]
pub struct InstallGitTool {
    system: Arc<SystemDetector>,
}

impl InstallGitTool {
    pub fn new(system: Arc<SystemDetector>) -> Self {
        Self { system }
    }
}

impl Tool for InstallGitTool {
    type Args = InstallArgs;

    fn name() -> &'static str {
        "install_git"
    }

    fn description() -> &'static str {
        "Install Git using the detected package manager, or return manual \
         instructions when none is supported."
    }

    fn idempotent() -> bool {
        true // Skips when already installed
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        install(ctx, &self.system, Program::Git, git_plan, args).await
    }
}

/// Tool installing the GitKraken CLI
#[derive(Clone)]
pub struct InstallGitKrakenCliTool {
    system: Arc<SystemDetector>,
    gitkraken: Arc<CapabilityDetector>,
}

impl InstallGitKrakenCliTool {
    pub fn new(system: Arc<SystemDetector>, gitkraken: Arc<CapabilityDetector>) -> Self {
        Self { system, gitkraken }
    }
}

impl Tool for InstallGitKrakenCliTool {
    type Args = InstallArgs;

    fn name() -> &'static str {
        "install_gitkraken_cli"
    }

    fn description() -> &'static str {
        "Install the GitKraken CLI (gk). Where no package is available, returns \
         download instructions. GitKraken tools become available afterwards."
    }

    fn idempotent() -> bool {
        true
    }

    async fn execute(&self, ctx: &ToolContext, args: Self::Args) -> anyhow::Result<ToolResult> {
        let dry_run = args.dry_run;
        let mut result = install(ctx, &self.system, Program::GitKraken, gitkraken_plan, args).await?;

        if !result.is_success() {
            if let Some(data) = result.data().cloned().filter(|d| d["requiresManualInstall"] == true) {
                let mut data = data;
                data["downloadUrl"] = json!(GITKRAKEN_RELEASES_URL);
                result = result.with_data(data);
            }
        } else if !dry_run {
            // The next catalogue listing picks up the gk tools
            self.gitkraken.reset_cache().await;
        }
        Ok(result)
    }
}

async fn install(
    ctx: &ToolContext,
    system: &SystemDetector,
    program: Program,
    plan_for: fn(&SystemInfo) -> InstallPlan,
    args: InstallArgs,
) -> anyhow::Result<ToolResult> {
    let name = program.display_name();

    let current = installation(ctx, system, program).await;
    if current.installed && !args.force {
        let version = current.version.clone().unwrap_or_else(|| "unknown version".to_string());
        return Ok(ToolResult::success(format!("{name} is already installed: {version}")).with_data(json!({
            "installed": true,
            "version": current.version,
            "method": "existing",
        })));
    }

    let info = system.system_info().await;
    let (steps, success_message) = match plan_for(&info) {
        InstallPlan::Manual { reason, instructions } => {
            return Ok(ToolResult::failure(reason.clone(), reason).with_data(json!({
                "installed": false,
                "requiresManualInstall": true,
                "instructions": instructions,
                "method": "manual",
            })));
        }
        InstallPlan::Automatic { steps, success_message } => (steps, success_message),
    };

    let commands: Vec<String> = steps.iter().map(|step| step.display()).collect();
    if args.dry_run {
        return Ok(ToolResult::preview(
            format!("Would install {name} via {}", info.package_manager.command()),
            json!({ "commands": commands, "method": info.package_manager }),
        ));
    }

    for step in &steps {
        log::info!("Installing {name}: {step}");
        if let Err(e) = ctx.runner().run(step).await {
            log::error!("{name} installation step `{step}` failed: {e}");
            return Ok(ToolResult::failure(format!("{name} installation failed"), error_text(&e)).with_data(
                json!({
                    "installed": false,
                    "failedCommand": step.display(),
                    "method": info.package_manager,
                }),
            ));
        }
    }

    let verified = installation(ctx, system, program).await;
    if !verified.installed {
        return Ok(ToolResult::failure(
            format!("{name} installation finished but {} is not on PATH", program.command()),
            "Installation could not be verified",
        )
        .with_data(json!({ "installed": false, "commands": commands })));
    }

    Ok(ToolResult::success(success_message).with_data(json!({
        "installed": true,
        "version": verified.version,
        "method": info.package_manager,
        "commands": commands,
    })))
}
