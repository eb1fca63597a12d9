//! Toolchain detection for flutter and git

use super::process::CommandRunner;
use super::tool::Toolchain;
use anyhow::Result;

const FLUTTER_INSTALL_HINT: &str = "https://docs.flutter.dev/get-started/install";
const GIT_INSTALL_HINT: &str = "https://git-scm.com/downloads";

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

async fn probe<R: CommandRunner>(
    runner: &R,
    toolchain: &Toolchain,
    name: &'static str,
    program: &str,
) -> RuntimeInfo {
    match runner.run(&toolchain.version(program)).await {
        Ok(out) if out.success => {
            // `flutter --version` prints a multi-line banner
            let version = out
                .stdout
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string);
            RuntimeInfo {
                name,
                version,
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if the Flutter SDK is available
pub async fn check_flutter<R: CommandRunner>(runner: &R, toolchain: &Toolchain) -> RuntimeInfo {
    probe(runner, toolchain, "Flutter", toolchain.flutter()).await
}

/// Check if git is available
pub async fn check_git<R: CommandRunner>(runner: &R, toolchain: &Toolchain) -> RuntimeInfo {
    probe(runner, toolchain, "Git", toolchain.git()).await
}

/// Flutter is required; git is advisory and only reported
pub async fn check_toolchain<R: CommandRunner>(
    runner: &R,
    toolchain: &Toolchain,
) -> Result<Vec<RuntimeInfo>> {
    let flutter = check_flutter(runner, toolchain).await;
    if !flutter.available {
        anyhow::bail!(
            "Missing required tools:\n  - Flutter SDK, `{}` (install from {})",
            toolchain.flutter(),
            FLUTTER_INSTALL_HINT
        );
    }

    let git = check_git(runner, toolchain).await;
    Ok(vec![flutter, git])
}

/// Where to get a tool that [`check_toolchain`] reported as missing
pub fn install_hint(info: &RuntimeInfo) -> &'static str {
    match info.name {
        "Flutter" => FLUTTER_INSTALL_HINT,
        _ => GIT_INSTALL_HINT,
    }
}
