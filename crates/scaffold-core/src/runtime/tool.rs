//! Flutter and git command construction
//!
//! `Toolchain` knows which programs to call and with which arguments; running
//! them is left to a [`CommandRunner`](super::CommandRunner).

use super::process::Invocation;
use crate::config::ScaffoldConfig;
use crate::product::ProductConfig;
use std::path::Path;

/// The external programs a scaffolding run relies on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    flutter: String,
    git: String,
}

impl Toolchain {
    pub fn new(flutter: impl Into<String>, git: impl Into<String>) -> Self {
        Self {
            flutter: flutter.into(),
            git: git.into(),
        }
    }

    /// Programs for `product`, honoring its flutter override environment variable
    pub fn from_product<C: ProductConfig>(product: &C) -> Self {
        let flutter = resolve_program(
            product.flutter_program(),
            std::env::var(product.flutter_program_env()).ok(),
        );
        Self::new(flutter, product.git_program())
    }

    pub fn flutter(&self) -> &str {
        &self.flutter
    }

    pub fn git(&self) -> &str {
        &self.git
    }

    /// `flutter create`, run from the workspace the project directory will live in
    pub fn create(&self, workspace: &Path, config: &ScaffoldConfig) -> Invocation {
        Invocation::new(&self.flutter, workspace)
            .arg("create")
            .arg("--org")
            .arg(&config.organization)
            .arg("--description")
            .arg(&config.description)
            .arg("--project-name")
            .arg(config.package_name())
            .arg(config.project_name.trim())
    }

    pub fn pub_get(&self, project_dir: &Path) -> Invocation {
        Invocation::new(&self.flutter, project_dir).args(["pub", "get"])
    }

    pub fn git_init(&self, project_dir: &Path) -> Invocation {
        Invocation::new(&self.git, project_dir).arg("init")
    }

    pub fn git_add_all(&self, project_dir: &Path) -> Invocation {
        Invocation::new(&self.git, project_dir).args(["add", "."])
    }

    pub fn git_commit(&self, project_dir: &Path, message: &str) -> Invocation {
        Invocation::new(&self.git, project_dir).args(["commit", "-m", message])
    }

    pub fn version(&self, program: &str) -> Invocation {
        Invocation::new(program, ".").arg("--version")
    }
}

/// An override wins unless it is blank
fn resolve_program(default: &str, override_value: Option<String>) -> String {
    override_value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}
