//! Dependency set builder
//!
//! Computes the runtime and development dependencies that end up in
//! `pubspec.yaml` from a fixed base group plus flag- and template-conditional
//! groups. Pure: no I/O, and every input combination is valid.

use crate::templates::TemplateId;
use indexmap::IndexMap;
use serde::Serialize;

/// A dependency's version constraint, or a small structured source table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DependencySpec {
    /// e.g. `^1.2.0`
    Version(String),
    /// e.g. `{sdk: flutter}`
    Table(IndexMap<String, String>),
}

impl DependencySpec {
    pub fn version(constraint: &str) -> Self {
        Self::Version(constraint.to_string())
    }

    /// A dependency shipped with an SDK (`sdk: flutter`)
    pub fn sdk(name: &str) -> Self {
        let mut table = IndexMap::new();
        table.insert("sdk".to_string(), name.to_string());
        Self::Table(table)
    }

    /// YAML form of this spec, as it should appear under `dependencies.<name>`
    pub fn to_value(&self) -> serde_yaml::Result<serde_yaml::Value> {
        serde_yaml::to_value(self)
    }
}

/// Optional dependency groups selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DependencyFlags {
    /// Leave out the Firebase integration group
    pub exclude_firebase: bool,
    /// Add the test-tooling group to `dev_dependencies`
    pub with_tests: bool,
    /// Add the analytics group
    pub with_analytics: bool,
}

/// Runtime and development dependencies; keys are unique, order is cosmetic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub dependencies: IndexMap<String, DependencySpec>,
    pub dev_dependencies: IndexMap<String, DependencySpec>,
}

#[derive(Debug, Clone, Copy)]
enum Pin {
    Version(&'static str),
    Sdk(&'static str),
}

type Group = &'static [(&'static str, Pin)];

const BASE: Group = &[
    ("flutter", Pin::Sdk("flutter")),
    ("cupertino_icons", Pin::Version("^1.0.8")),
    ("http", Pin::Version("^1.2.2")),
    ("shared_preferences", Pin::Version("^2.3.2")),
    ("flutter_dotenv", Pin::Version("^5.1.0")),
    ("intl", Pin::Version("^0.19.0")),
];

const FIREBASE: Group = &[
    ("firebase_core", Pin::Version("^3.6.0")),
    ("firebase_auth", Pin::Version("^5.3.1")),
    ("cloud_firestore", Pin::Version("^5.4.4")),
];

const MVVM: Group = &[
    ("provider", Pin::Version("^6.1.2")),
    ("get_it", Pin::Version("^8.0.0")),
];

const BLOC: Group = &[
    ("flutter_bloc", Pin::Version("^8.1.6")),
    ("equatable", Pin::Version("^2.0.5")),
];

const ANALYTICS: Group = &[("firebase_analytics", Pin::Version("^11.3.3"))];

const TESTING: Group = &[
    ("flutter_test", Pin::Sdk("flutter")),
    ("integration_test", Pin::Sdk("flutter")),
    ("mocktail", Pin::Version("^1.0.4")),
    ("flutter_lints", Pin::Version("^5.0.0")),
];

/// The dependency groups a set is assembled from, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyGroup {
    Base,
    Firebase,
    Template(TemplateId),
    Analytics,
    Testing,
}

impl DependencyGroup {
    fn entries(self) -> Group {
        match self {
            DependencyGroup::Base => BASE,
            DependencyGroup::Firebase => FIREBASE,
            DependencyGroup::Template(TemplateId::Default) => &[],
            DependencyGroup::Template(TemplateId::Mvvm) => MVVM,
            DependencyGroup::Template(TemplateId::Bloc) => BLOC,
            DependencyGroup::Analytics => ANALYTICS,
            DependencyGroup::Testing => TESTING,
        }
    }

    /// Package names contributed by this group
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.entries().iter().map(|(name, _)| *name)
    }

    /// Union this group into `target`; later groups overwrite matching keys
    fn apply(self, target: &mut IndexMap<String, DependencySpec>) {
        for (name, pin) in self.entries() {
            let spec = match pin {
                Pin::Version(constraint) => DependencySpec::version(constraint),
                Pin::Sdk(sdk) => DependencySpec::sdk(sdk),
            };
            target.insert((*name).to_string(), spec);
        }
    }
}

/// Compute the dependency set for a template and flag combination
///
/// Groups apply in the order base, firebase, template, analytics. The
/// development map only ever holds the test-tooling group.
pub fn build(template: TemplateId, flags: DependencyFlags) -> DependencySet {
    let mut set = DependencySet::default();

    DependencyGroup::Base.apply(&mut set.dependencies);
    if !flags.exclude_firebase {
        DependencyGroup::Firebase.apply(&mut set.dependencies);
    }
    DependencyGroup::Template(template).apply(&mut set.dependencies);
    if flags.with_analytics {
        DependencyGroup::Analytics.apply(&mut set.dependencies);
    }

    if flags.with_tests {
        DependencyGroup::Testing.apply(&mut set.dev_dependencies);
    }

    set
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_flag_combinations() -> Vec<DependencyFlags> {
        let mut combos = Vec::new();
        for bits in 0..8u8 {
            combos.push(DependencyFlags {
                exclude_firebase: bits & 1 != 0,
                with_tests: bits & 2 != 0,
                with_analytics: bits & 4 != 0,
            });
        }
        combos
    }

    #[test]
    fn test_base_always_present() {
        for template in TemplateId::ALL {
            for flags in all_flag_combinations() {
                let set = build(template, flags);
                for name in DependencyGroup::Base.names() {
                    assert!(
                        set.dependencies.contains_key(name),
                        "{} missing for {} {:?}",
                        name,
                        template,
                        flags
                    );
                }
            }
        }
    }

    #[test]
    fn test_exclude_firebase_removes_group() {
        for flags in all_flag_combinations().into_iter().filter(|f| f.exclude_firebase) {
            let set = build(TemplateId::Bloc, flags);
            for name in DependencyGroup::Firebase.names() {
                assert!(!set.dependencies.contains_key(name));
            }
        }
        let set = build(TemplateId::Bloc, DependencyFlags::default());
        assert!(set.dependencies.contains_key("firebase_core"));
    }

    #[test]
    fn test_dev_dependencies_only_with_tests() {
        for flags in all_flag_combinations() {
            let set = build(TemplateId::Mvvm, flags);
            if flags.with_tests {
                let names: Vec<&str> = set.dev_dependencies.keys().map(String::as_str).collect();
                assert_eq!(names, DependencyGroup::Testing.names().collect::<Vec<_>>());
            } else {
                assert!(set.dev_dependencies.is_empty());
            }
        }
    }

    #[test]
    fn test_template_groups() {
        let bloc = build(TemplateId::Bloc, DependencyFlags::default());
        assert_eq!(bloc.dependencies["flutter_bloc"], DependencySpec::version("^8.1.6"));
        assert!(bloc.dependencies.contains_key("equatable"));
        assert!(!bloc.dependencies.contains_key("provider"));

        let mvvm = build(TemplateId::Mvvm, DependencyFlags::default());
        assert!(mvvm.dependencies.contains_key("provider"));
        assert!(mvvm.dependencies.contains_key("get_it"));
        assert!(!mvvm.dependencies.contains_key("flutter_bloc"));
    }

    #[test]
    fn test_unknown_template_without_optional_groups_is_base_only() {
        let flags = DependencyFlags {
            exclude_firebase: true,
            ..Default::default()
        };
        let set = build(TemplateId::parse("unheard-of"), flags);
        let names: Vec<&str> = set.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, DependencyGroup::Base.names().collect::<Vec<_>>());
        assert!(set.dev_dependencies.is_empty());
    }

    #[test]
    fn test_analytics_group() {
        let flags = DependencyFlags {
            with_analytics: true,
            ..Default::default()
        };
        assert!(build(TemplateId::Default, flags)
            .dependencies
            .contains_key("firebase_analytics"));
        assert!(!build(TemplateId::Default, DependencyFlags::default())
            .dependencies
            .contains_key("firebase_analytics"));
    }

    #[test]
    fn test_build_is_deterministic() {
        for flags in all_flag_combinations() {
            let first = build(TemplateId::Bloc, flags);
            let _ = build(TemplateId::Mvvm, flags);
            let second = build(TemplateId::Bloc, flags);
            assert_eq!(first, second);
            assert!(first.dependencies.keys().eq(second.dependencies.keys()));
        }
    }

    #[test]
    fn test_later_groups_overwrite_shared_keys() {
        let mut target = IndexMap::new();
        target.insert("flutter_lints".to_string(), DependencySpec::version("^1.0.0"));
        DependencyGroup::Testing.apply(&mut target);
        assert_eq!(target["flutter_lints"], DependencySpec::version("^5.0.0"));
        // overwritten keys keep their original position
        assert_eq!(target.get_index_of("flutter_lints"), Some(0));
    }

    #[test]
    fn test_sdk_spec_serializes_as_table() {
        let value = DependencySpec::sdk("flutter").to_value().unwrap();
        assert_eq!(serde_yaml::to_string(&value).unwrap(), "sdk: flutter\n");

        let value = DependencySpec::version("^2.0.0").to_value().unwrap();
        assert_eq!(value, serde_yaml::Value::String("^2.0.0".to_string()));
    }
}
