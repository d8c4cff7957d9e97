//! Installation plans for Git and the GitKraken CLI

use crate::runner::CommandLine;
use crate::system::{PackageManager, SystemInfo};

pub const GITKRAKEN_RELEASES_URL: &str = "https://github.com/gitkraken/gk-cli/releases";

/// What installing a program on this host takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
    /// Run these commands in order.
    Automatic {
        steps: Vec<CommandLine>,
        success_message: String,
    },
    /// No supported route; the user must follow the instructions.
    Manual { reason: String, instructions: String },
}

/// Package-manager installation of Git.
pub fn git_plan(system: &SystemInfo) -> InstallPlan {
    let (steps, via): (Vec<Vec<&str>>, &str) = match system.package_manager {
        PackageManager::Brew => (vec![vec!["brew", "install", "git"]], "Homebrew"),
        PackageManager::Apt => (
            vec![vec!["apt", "update"], vec!["apt", "install", "-y", "git"]],
            "apt",
        ),
        PackageManager::Yum => (vec![vec!["yum", "install", "-y", "git"]], "yum"),
        PackageManager::Dnf => (vec![vec!["dnf", "install", "-y", "git"]], "dnf"),
        PackageManager::Pacman => (vec![vec!["pacman", "-S", "--noconfirm", "git"]], "pacman"),
        PackageManager::Choco => (vec![vec!["choco", "install", "git", "-y"]], "Chocolatey"),
        PackageManager::Winget => (
            vec![vec!["winget", "install", "--id", "Git.Git", "-e", "--source", "winget"]],
            "winget",
        ),
        PackageManager::Scoop => (vec![vec!["scoop", "install", "git"]], "Scoop"),
        PackageManager::Unknown => {
            return InstallPlan::Manual {
                reason: "Git installation requires manual setup".to_string(),
                instructions: git_instructions(&system.platform),
            };
        }
    };

    InstallPlan::Automatic {
        steps: steps
            .into_iter()
            .map(|argv| elevate(system, argv))
            .collect(),
        success_message: format!("Git installed successfully via {via}"),
    }
}

/// GitKraken CLI installation. Only winget carries a package.
pub fn gitkraken_plan(system: &SystemInfo) -> InstallPlan {
    match system.package_manager {
        PackageManager::Winget => InstallPlan::Automatic {
            steps: vec![elevate(
                system,
                vec!["winget", "install", "--id", "GitKraken.CLI", "-e", "--source", "winget"],
            )],
            success_message: "GitKraken CLI installed successfully via winget".to_string(),
        },
        PackageManager::Brew => manual_gitkraken(system, "GitKraken CLI not available via Homebrew"),
        PackageManager::Choco => manual_gitkraken(system, "GitKraken CLI not available via Chocolatey"),
        _ => manual_gitkraken(system, "GitKraken CLI requires manual installation"),
    }
}

fn manual_gitkraken(system: &SystemInfo, reason: &str) -> InstallPlan {
    InstallPlan::Manual {
        reason: reason.to_string(),
        instructions: gitkraken_instructions(&system.platform),
    }
}

/// System package managers on Unix need root. Homebrew refuses it and the
/// Windows managers elevate themselves.
fn elevate(system: &SystemInfo, argv: Vec<&str>) -> CommandLine {
    let needs_sudo = !system.is_admin
        && matches!(
            system.package_manager,
            PackageManager::Apt | PackageManager::Yum | PackageManager::Dnf | PackageManager::Pacman
        );
    let mut argv = argv.into_iter();
    let program = argv.next().unwrap_or_default();
    if needs_sudo {
        CommandLine::new("sudo").arg(program).args(argv)
    } else {
        CommandLine::new(program).args(argv)
    }
}

fn git_instructions(platform: &str) -> String {
    match platform {
        "windows" => "\
Windows installation:
1. Visit https://git-scm.com/download/windows
2. Download and run the Git installer
3. Restart your terminal
4. Verify with `git --version`
Alternatives: `winget install Git.Git` or `choco install git`"
            .to_string(),
        "macos" => "\
macOS installation:
1. Install Homebrew from https://brew.sh/
2. Run `brew install git`, or download from https://git-scm.com/download/mac
3. Verify with `git --version`
Alternative: `xcode-select --install`"
            .to_string(),
        _ => "\
Linux installation:
- Ubuntu/Debian: `sudo apt update && sudo apt install git`
- CentOS/RHEL: `sudo yum install git` or `sudo dnf install git`
- Arch Linux: `sudo pacman -S git`
- Or visit https://git-scm.com/download/linux
Verify with `git --version`"
            .to_string(),
    }
}

fn gitkraken_instructions(platform: &str) -> String {
    let (asset, steps) = match platform {
        "windows" => (
            "gk-windows-x64.exe",
            "3. Rename it to `gk.exe` and add its folder to PATH\n4. Or run `winget install GitKraken.CLI`",
        ),
        "macos" => (
            "gk-darwin-x64 or gk-darwin-arm64",
            "3. Make it executable: `chmod +x gk-darwin-*`\n4. Move it onto PATH: `sudo mv gk-darwin-* /usr/local/bin/gk`",
        ),
        _ => (
            "gk-linux-x64",
            "3. Make it executable: `chmod +x gk-linux-x64`\n4. Move it onto PATH: `sudo mv gk-linux-x64 /usr/local/bin/gk`",
        ),
    };
    format!(
        "GitKraken CLI installation:\n\
         1. Visit {GITKRAKEN_RELEASES_URL}\n\
         2. Download the latest release ({asset})\n\
         {steps}\n\
         5. Verify with `gk version`\n\
         Then run `gk auth login` to connect your GitKraken account."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system(pm: PackageManager, platform: &str, admin: bool) -> SystemInfo {
        SystemInfo {
            platform: platform.to_string(),
            arch: "x86_64".to_string(),
            release: "6.1".to_string(),
            package_manager: pm,
            shell: "/bin/bash".to_string(),
            is_wsl: false,
            is_admin: admin,
        }
    }

    #[test]
    fn apt_updates_then_installs_with_sudo() {
        match git_plan(&system(PackageManager::Apt, "linux", false)) {
            InstallPlan::Automatic { steps, success_message } => {
                assert_eq!(steps.len(), 2);
                assert_eq!(steps[0].display(), "sudo apt update");
                assert_eq!(steps[1].display(), "sudo apt install -y git");
                assert_eq!(success_message, "Git installed successfully via apt");
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn brew_never_runs_as_root() {
        match git_plan(&system(PackageManager::Brew, "macos", false)) {
            InstallPlan::Automatic { steps, .. } => assert_eq!(steps[0].display(), "brew install git"),
            other => panic!("unexpected plan {other:?}"),
        }
    }

    #[test]
    fn unknown_manager_means_manual() {
        assert!(matches!(
            git_plan(&system(PackageManager::Unknown, "linux", true)),
            InstallPlan::Manual { .. }
        ));
        match gitkraken_plan(&system(PackageManager::Brew, "macos", true)) {
            InstallPlan::Manual { reason, instructions } => {
                assert_eq!(reason, "GitKraken CLI not available via Homebrew");
                assert!(instructions.contains("gk-darwin"));
            }
            other => panic!("unexpected plan {other:?}"),
        }
    }
}
