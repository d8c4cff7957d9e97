//! Host system detection used by the installer tools

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::runner::{CommandLine, CommandRunner};

/// Package managers the installers know how to drive, in probe order.
pub const PACKAGE_MANAGERS: [PackageManager; 8] = [
    PackageManager::Brew,
    PackageManager::Apt,
    PackageManager::Yum,
    PackageManager::Dnf,
    PackageManager::Pacman,
    PackageManager::Choco,
    PackageManager::Winget,
    PackageManager::Scoop,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Brew,
    Apt,
    Yum,
    Dnf,
    Pacman,
    Choco,
    Winget,
    Scoop,
    Unknown,
}

impl PackageManager {
    pub fn command(self) -> &'static str {
        match self {
            PackageManager::Brew => "brew",
            PackageManager::Apt => "apt",
            PackageManager::Yum => "yum",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Choco => "choco",
            PackageManager::Winget => "winget",
            PackageManager::Scoop => "scoop",
            PackageManager::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub platform: String,
    pub arch: String,
    pub release: String,
    pub package_manager: PackageManager,
    pub shell: String,
    #[serde(rename = "isWSL")]
    pub is_wsl: bool,
    pub is_admin: bool,
}

impl SystemInfo {
    pub fn is_windows(&self) -> bool {
        self.platform == "windows"
    }
}

/// Cached host probe.
pub struct SystemDetector {
    runner: Arc<dyn CommandRunner>,
    info: Mutex<Option<SystemInfo>>,
}

impl SystemDetector {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            info: Mutex::new(None),
        }
    }

    pub async fn system_info(&self) -> SystemInfo {
        let mut cached = self.info.lock().await;
        if let Some(info) = cached.as_ref() {
            return info.clone();
        }

        let platform = std::env::consts::OS.to_string();
        let info = SystemInfo {
            arch: std::env::consts::ARCH.to_string(),
            release: self.release(&platform).await,
            package_manager: self.detect_package_manager().await,
            shell: std::env::var("SHELL")
                .or_else(|_| std::env::var("COMSPEC"))
                .unwrap_or_else(|_| "unknown".to_string()),
            is_wsl: detect_wsl(&platform).await,
            is_admin: self.is_admin(&platform).await,
            platform,
        };

        log::info!(
            "System detected: {} {} (package manager: {}, wsl: {}, admin: {})",
            info.platform,
            info.arch,
            info.package_manager.command(),
            info.is_wsl,
            info.is_admin
        );
        *cached = Some(info.clone());
        info
    }

    /// Whether `command` resolves on the search path.
    pub async fn has_command(&self, command: &str) -> bool {
        let lookup = if cfg!(windows) { "where" } else { "which" };
        self.runner
            .run(&CommandLine::new(lookup).arg(command))
            .await
            .is_ok()
    }

    pub async fn reset_cache(&self) {
        *self.info.lock().await = None;
    }

    async fn detect_package_manager(&self) -> PackageManager {
        for pm in PACKAGE_MANAGERS {
            let probe = CommandLine::new(pm.command()).arg("--version");
            if self.runner.run(&probe).await.is_ok() {
                log::info!("Package manager detected: {}", pm.command());
                return pm;
            }
        }
        log::warn!("No supported package manager detected");
        PackageManager::Unknown
    }

    async fn release(&self, platform: &str) -> String {
        let probe = if platform == "windows" {
            CommandLine::new("cmd").args(["/C", "ver"])
        } else {
            CommandLine::new("uname").arg("-r")
        };
        match self.runner.run(&probe).await {
            Ok(output) => output.trimmed().to_string(),
            Err(_) => "unknown".to_string(),
        }
    }

    async fn is_admin(&self, platform: &str) -> bool {
        if platform == "windows" {
            return self
                .runner
                .run(&CommandLine::new("net").arg("session"))
                .await
                .is_ok();
        }
        match self.runner.run(&CommandLine::new("id").arg("-u")).await {
            Ok(output) => output.trimmed() == "0",
            Err(_) => false,
        }
    }
}

async fn detect_wsl(platform: &str) -> bool {
    if platform != "linux" {
        return false;
    }
    match tokio::fs::read_to_string("/proc/version").await {
        Ok(version) => {
            let version = version.to_lowercase();
            version.contains("microsoft") || version.contains("wsl")
        }
        Err(_) => false,
    }
}
