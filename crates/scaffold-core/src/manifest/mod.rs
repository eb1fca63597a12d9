//! pubspec.yaml handling
//!
//! This module provides:
//! - `Document` - a format-preserving, key-path editable YAML document
//! - `merge` - applies a dependency set and scaffold metadata to manifest text

pub mod document;
pub mod merge;

pub use document::{Document, ManifestError, PathConflict};
pub use merge::{merge, MergeReport, MergedManifest, METADATA_KEY};

/// File name of the manifest inside a Flutter project
pub const MANIFEST_FILE: &str = "pubspec.yaml";
