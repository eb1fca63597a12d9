//! Error types for scaffold-core

use crate::manifest::ManifestError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using scaffold-core's Error type
pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Fatal scaffolding errors
///
/// Non-fatal collaborator failures (dependency installation, git) never show
/// up here; the orchestrator records them as warnings instead.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// No project name, or a name made only of whitespace
    #[error("A project name is required (use --name)")]
    MissingName,

    /// The bootstrap tool ran but reported failure
    #[error("Project bootstrap failed: `{command}` ({status})\n{diagnostic}")]
    Bootstrap {
        command: String,
        status: String,
        diagnostic: String,
    },

    /// The bootstrap tool succeeded but the project directory is not there
    #[error("Expected project directory was not created: {}", path.display())]
    ProjectDirMissing { path: PathBuf },

    /// An external program could not be started at all
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem failure while generating the project tree
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The existing pubspec could not be understood
    #[error("Failed to update pubspec.yaml: {0}")]
    Manifest(#[from] ManifestError),
}

impl ScaffoldError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_error_surfaces_diagnostic() {
        let err = ScaffoldError::Bootstrap {
            command: "flutter create demo".to_string(),
            status: "exit code 64".to_string(),
            diagnostic: "\"Demo\" is not a valid Dart package name.".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("flutter create demo"));
        assert!(message.contains("exit code 64"));
        assert!(message.contains("not a valid Dart package name"));
    }

    #[test]
    fn test_io_error_names_path() {
        let err = ScaffoldError::io(
            "write",
            "/tmp/demo/lib/main.dart",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to write /tmp/demo/lib/main.dart: denied"
        );
    }
}
