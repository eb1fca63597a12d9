//! Per-run scaffolding configuration

use crate::dependencies::DependencyFlags;
use crate::templates::TemplateId;

/// Template used when none is given
pub const DEFAULT_TEMPLATE: &str = "default";

/// Organization passed to `flutter create --org` when none is given
pub const DEFAULT_ORGANIZATION: &str = "com.example";

/// Description passed to `flutter create --description` when none is given
pub const DEFAULT_DESCRIPTION: &str = "A new project";

/// Everything one generation run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// Project and directory name, as typed by the user
    pub project_name: String,

    /// Raw template identifier; resolved leniently via [`TemplateId::parse`]
    pub template: String,

    /// Reverse-domain organization identifier
    pub organization: String,

    /// One-line project description
    pub description: String,

    /// Optional dependency groups
    pub flags: DependencyFlags,
}

impl ScaffoldConfig {
    /// Create a configuration with default template, organization and description
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            template: DEFAULT_TEMPLATE.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            flags: DependencyFlags::default(),
        }
    }

    /// The template this run resolves to (unknown identifiers become `default`)
    pub fn template_id(&self) -> TemplateId {
        TemplateId::parse(&self.template)
    }

    /// Dart package name derived from the project name
    pub fn package_name(&self) -> String {
        package_name(&self.project_name)
    }
}

/// Convert a project name into a valid Dart package name
///
/// `DemoApp` becomes `demo_app`, `my-app` becomes `my_app`. Names that would
/// otherwise be empty or start with a digit get an `app_` prefix.
pub fn package_name(project_name: &str) -> String {
    let chars: Vec<char> = project_name.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next.is_some_and(|n| n.is_ascii_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if matches!(c, '_' | '-' | ' ' | '.') {
            out.push('_');
        }
    }

    // Collapse separator runs and trim them from the ends
    let collapsed = out
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if collapsed.is_empty() || collapsed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("app_{}", collapsed).trim_end_matches('_').to_string()
    } else {
        collapsed
    }
}
