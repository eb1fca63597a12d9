//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a product binary implements to configure
//! the scaffolding behavior: identity, external programs and the instructions
//! shown once a project has been generated.

use crate::config::ScaffoldConfig;
use std::path::Path;

/// Configuration trait for scaffolding products
///
/// Each product implements this trait to define:
/// - Product identity (display name)
/// - The programs used for bootstrap, dependency installation and version control
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Default program used for `create` and `pub get`
    fn flutter_program(&self) -> &'static str {
        "flutter"
    }

    /// Environment variable name for overriding the flutter program
    fn flutter_program_env(&self) -> &'static str;

    /// Program used for version control initialization
    fn git_program(&self) -> &'static str {
        "git"
    }

    /// Message of the initial commit
    fn commit_message(&self) -> String {
        format!("Initial commit from {}", self.display_name())
    }

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, config: &ScaffoldConfig) -> Vec<String>;
}
