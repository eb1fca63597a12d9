//! Template registry, directory layout and source stubs
//!
//! This module provides:
//! - `TemplateId` - the closed set of architectural templates
//! - `TemplateRegistry` - maps each template to its directories and stub generators
//! - Directory planning (base + template extras, de-duplicated) and leaf detection
//! - Template-agnostic stubs and fixed auxiliary files
//!
//! Everything here is pure: no filesystem access happens in this module.

pub mod files;
pub mod stubs;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

pub use files::AUX_FILES;

/// Directories created for every template
pub const BASE_DIRECTORIES: &[&str] = &[
    "lib/config",
    "lib/models",
    "lib/screens",
    "lib/services",
    "lib/utils",
    "lib/widgets",
    "assets/images",
    "assets/fonts",
    "test",
];

/// File written into every leaf directory so it survives version control
pub const PLACEHOLDER_FILE: &str = ".gitkeep";

/// Supported architectural templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateId {
    Default,
    Mvvm,
    Bloc,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Default, TemplateId::Mvvm, TemplateId::Bloc];

    /// Resolve an identifier, falling back to `Default` for anything unrecognized
    pub fn parse(s: &str) -> Self {
        Self::recognize(s).unwrap_or(TemplateId::Default)
    }

    /// Resolve an identifier strictly (case-insensitive)
    pub fn recognize(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Default => "default",
            TemplateId::Mvvm => "mvvm",
            TemplateId::Bloc => "bloc",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Values substituted into stub templates
#[derive(Debug, Clone)]
pub struct StubContext {
    pub project_name: String,
    pub package_name: String,
    pub description: String,
    pub template: TemplateId,
}

impl StubContext {
    /// Substitute `{{placeholders}}` in a stub template
    ///
    /// `*_literal` placeholders are escaped for use inside single-quoted Dart strings.
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{{project_name_literal}}", &dart_literal(&self.project_name))
            .replace("{{description_literal}}", &dart_literal(&self.description))
            .replace("{{project_name}}", &self.project_name)
            .replace("{{package_name}}", &self.package_name)
            .replace("{{description}}", &self.description)
            .replace("{{template}}", self.template.as_str())
    }
}

fn dart_literal(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('$', "\\$")
}

/// Pure generator producing a stub file's full content
pub type StubGenerator = fn(&StubContext) -> String;

/// A named stub: where it goes and how to produce it
#[derive(Debug, Clone, Copy)]
pub struct StubSpec {
    pub name: &'static str,
    pub path: &'static str,
    pub generate: StubGenerator,
}

/// A rendered stub, ready to be written (overwriting whatever is there)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFile {
    pub path: String,
    pub content: String,
}

impl StubSpec {
    pub fn render(&self, ctx: &StubContext) -> StubFile {
        StubFile {
            path: self.path.to_string(),
            content: (self.generate)(ctx),
        }
    }
}

/// Directories and stub generators for one template
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    pub id: TemplateId,
    pub description: &'static str,
    pub directories: &'static [&'static str],
    pub stubs: &'static [StubSpec],
}

impl TemplateBundle {
    /// Look up one stub generator by name
    pub fn stub(&self, name: &str) -> Option<&StubSpec> {
        self.stubs.iter().find(|s| s.name == name)
    }

    /// Render this template's stubs followed by the template-agnostic ones
    pub fn render_stubs(&self, ctx: &StubContext) -> Vec<StubFile> {
        self.stubs
            .iter()
            .chain(stubs::COMMON.iter())
            .map(|spec| spec.render(ctx))
            .collect()
    }
}

/// Template lookup; every `TemplateId` always has a bundle
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    bundles: HashMap<TemplateId, TemplateBundle>,
}

impl TemplateRegistry {
    /// Registry with the built-in default, mvvm and bloc templates
    pub fn builtin() -> Self {
        let bundles = [stubs::DEFAULT_BUNDLE, stubs::MVVM_BUNDLE, stubs::BLOC_BUNDLE]
            .into_iter()
            .map(|bundle| (bundle.id, bundle))
            .collect();
        Self { bundles }
    }

    /// Add or replace the bundle for `bundle.id`
    pub fn register(&mut self, bundle: TemplateBundle) {
        self.bundles.insert(bundle.id, bundle);
    }

    /// Resolve a raw identifier; unknown identifiers yield the default template
    pub fn resolve(&self, template: &str) -> &TemplateBundle {
        self.get(TemplateId::parse(template))
    }

    pub fn get(&self, id: TemplateId) -> &TemplateBundle {
        // builtin() seeds every variant and register() only replaces
        &self.bundles[&id]
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Base directories plus the template's extras, de-duplicated and sorted
pub fn plan_directories(bundle: &TemplateBundle) -> Vec<String> {
    BASE_DIRECTORIES
        .iter()
        .chain(bundle.directories.iter())
        .map(|dir| dir.trim_matches('/').to_string())
        .filter(|dir| !dir.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Directories with no other planned directory beneath them
pub fn leaf_directories(dirs: &[String]) -> Vec<&str> {
    dirs.iter()
        .filter(|dir| {
            let prefix = format!("{}/", dir);
            !dirs.iter().any(|other| other.starts_with(&prefix))
        })
        .map(String::as_str)
        .collect()
}
