//! Scaffold Core - Shared library for Flutter project scaffolding CLIs
//!
//! This library turns a freshly bootstrapped Flutter project into an opinionated
//! starting point: a fixed folder layout, template-specific source stubs, and a
//! `pubspec.yaml` with the dependency groups the user asked for.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Pure building blocks** - template registry, dependency set builder,
//!   format-preserving manifest document and merger
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, external command
//!   collaborators and the `Scaffolder` pipeline
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based front end (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffold_core::{dependencies, manifest, TemplateId};
//!
//! let set = dependencies::build(TemplateId::Bloc, Default::default());
//! let merged = manifest::merge(&pubspec, &set, TemplateId::Bloc, "0.1.0")?;
//! std::fs::write("pubspec.yaml", merged.text)?;
//! ```

pub mod config;
pub mod dependencies;
pub mod error;
pub mod manifest;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::ScaffoldConfig;
pub use dependencies::{DependencyFlags, DependencySet, DependencySpec};
pub use error::{Result, ScaffoldError};
pub use manifest::{Document, ManifestError, MergeReport, MergedManifest};
pub use product::ProductConfig;
pub use runtime::{CommandRunner, Invocation, ProcessOutput, SystemRunner, Toolchain};
pub use scaffold::{Reporter, ScaffoldOutcome, Scaffolder, Stage};
pub use templates::{TemplateBundle, TemplateId, TemplateRegistry};

#[cfg(feature = "tui")]
pub use tui::run;

/// Fallback generator version recorded in the manifest metadata.
/// Each binary should pass its own version, but this keeps library callers working.
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
