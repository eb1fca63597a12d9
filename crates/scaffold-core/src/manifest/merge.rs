//! Structural merge of a dependency set into pubspec.yaml text
//!
//! Only `dependencies.<name>`, `dev_dependencies.<name>` and the metadata key
//! are written; every other line of the document is kept as it was.
//!
//! When a targeted section exists but is not a mapping (say
//! `dependencies: "oops"`), the section is replaced by a fresh mapping holding
//! only the new keys. This is intentional: the merge always succeeds, at the
//! cost of whatever the malformed section held. The affected paths are listed
//! in [`MergeReport::replaced`].

use super::document::{Document, ManifestError};
use crate::dependencies::DependencySet;
use crate::templates::TemplateId;
use serde::Serialize;
use serde_yaml::Value;

/// Top-level key recording how the project was generated
pub const METADATA_KEY: &str = "flutter_scaffold";

const DEPENDENCIES: &str = "dependencies";
const DEV_DEPENDENCIES: &str = "dev_dependencies";

/// What a merge touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Key paths written, in order
    pub updated: Vec<String>,
    /// Non-mapping sections that were replaced wholesale
    pub replaced: Vec<String>,
}

/// Result of [`merge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedManifest {
    pub text: String,
    pub report: MergeReport,
}

#[derive(Serialize)]
struct ScaffoldMetadata<'a> {
    template: &'a str,
    generator_version: &'a str,
}

/// Merge `set` and the scaffold metadata into existing manifest text
///
/// An empty development map leaves `dev_dependencies` untouched. Merging the
/// same set twice produces the same text as merging it once.
pub fn merge(
    existing: &str,
    set: &DependencySet,
    template: TemplateId,
    generator_version: &str,
) -> Result<MergedManifest, ManifestError> {
    let mut doc = Document::parse(existing)?;
    let mut report = MergeReport::default();

    for (section, deps) in [
        (DEPENDENCIES, &set.dependencies),
        (DEV_DEPENDENCIES, &set.dev_dependencies),
    ] {
        for (name, spec) in deps {
            apply(&mut doc, &[section, name.as_str()], &spec.to_value()?, &mut report);
        }
    }

    let metadata = serde_yaml::to_value(ScaffoldMetadata {
        template: template.as_str(),
        generator_version,
    })?;
    apply(&mut doc, &[METADATA_KEY], &metadata, &mut report);

    Ok(MergedManifest {
        text: doc.to_string(),
        report,
    })
}

fn apply(doc: &mut Document, path: &[&str], value: &Value, report: &mut MergeReport) {
    if let Err(conflict) = doc.try_set(path, value) {
        report.replaced.push(conflict.path);
        doc.force_set(path, value);
    }
    report.updated.push(path.join("."));
}
