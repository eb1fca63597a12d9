//! Scaffolding pipeline
//!
//! `Scaffolder` runs one generation: bootstrap the project with `flutter
//! create`, lay down directories and stub files, merge dependencies into
//! `pubspec.yaml`, then install dependencies and create the first commit.
//!
//! Failures up to and including the manifest merge abort the run. Dependency
//! installation and git failures become warnings on the outcome. Nothing is
//! rolled back: a failed run leaves whatever it created on disk.

use crate::config::ScaffoldConfig;
use crate::dependencies;
use crate::error::{Result, ScaffoldError};
use crate::manifest::{self, MergeReport, MANIFEST_FILE};
use crate::product::ProductConfig;
use crate::runtime::{CommandRunner, Invocation, Toolchain};
use crate::templates::{
    leaf_directories, plan_directories, StubContext, TemplateBundle, TemplateId,
    TemplateRegistry, AUX_FILES, PLACEHOLDER_FILE,
};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Receives progress from a running [`Scaffolder`]
///
/// Every `step` is followed by exactly one `done` or `warning`, unless the run
/// aborts, in which case `failed` is called instead.
pub trait Reporter {
    fn step(&mut self, message: &str);
    fn done(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn failed(&mut self, _message: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// How far a run got
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Start,
    Bootstrapped,
    StructureCreated,
    ManifestMerged,
    Finished,
}

/// Everything a completed run produced
#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    pub project_dir: PathBuf,
    pub package_name: String,
    /// Resolved template, after any fallback
    pub template: TemplateId,
    /// Created directories, relative to `project_dir`
    pub directories: Vec<String>,
    /// Written files, relative to `project_dir`
    pub files: Vec<String>,
    pub warnings: Vec<String>,
    pub stage: Stage,
    pub merge_report: MergeReport,
}

impl ScaffoldOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Runs the scaffolding pipeline for a product
pub struct Scaffolder<C, R> {
    product: C,
    runner: R,
    toolchain: Toolchain,
    registry: TemplateRegistry,
    workspace: PathBuf,
    generator_version: String,
}

impl<C: ProductConfig, R: CommandRunner> Scaffolder<C, R> {
    /// Create projects inside `workspace` using the built-in templates
    pub fn new(product: C, runner: R, workspace: impl Into<PathBuf>) -> Self {
        Self {
            toolchain: Toolchain::from_product(&product),
            product,
            runner,
            registry: TemplateRegistry::builtin(),
            workspace: workspace.into(),
            generator_version: crate::DEFAULT_CLI_VERSION.to_string(),
        }
    }

    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Version recorded in the manifest metadata
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.generator_version = version.into();
        self
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub async fn run<P: Reporter>(
        &self,
        config: &ScaffoldConfig,
        reporter: &mut P,
    ) -> Result<ScaffoldOutcome> {
        let result = self.pipeline(config, reporter).await;
        if let Err(err) = &result {
            let message = err.to_string();
            reporter.failed(message.lines().next().unwrap_or_default());
        }
        result
    }

    async fn pipeline<P: Reporter>(
        &self,
        config: &ScaffoldConfig,
        reporter: &mut P,
    ) -> Result<ScaffoldOutcome> {
        let name = config.project_name.trim();
        if name.is_empty() {
            return Err(ScaffoldError::MissingName);
        }

        let bundle = self.registry.resolve(&config.template);
        let mut outcome = ScaffoldOutcome {
            project_dir: self.workspace.join(name),
            package_name: config.package_name(),
            template: bundle.id,
            directories: Vec::new(),
            files: Vec::new(),
            warnings: Vec::new(),
            stage: Stage::Start,
            merge_report: MergeReport::default(),
        };

        reporter.step("Creating Flutter project...");
        self.bootstrap(config).await?;
        if !outcome.project_dir.is_dir() {
            return Err(ScaffoldError::ProjectDirMissing {
                path: outcome.project_dir,
            });
        }
        outcome.stage = Stage::Bootstrapped;
        reporter.done(&format!("Created Flutter project {}", name));

        reporter.step("Creating project structure...");
        self.write_structure(bundle, config, &mut outcome).await?;
        outcome.stage = Stage::StructureCreated;
        reporter.done(&format!(
            "Created {} directories and {} files ({} template)",
            outcome.directories.len(),
            outcome.files.len(),
            outcome.template
        ));

        reporter.step("Updating pubspec.yaml...");
        let added = self.merge_manifest(config, &mut outcome).await?;
        outcome.stage = Stage::ManifestMerged;
        reporter.done(&format!("Added {} dependencies to {}", added, MANIFEST_FILE));

        reporter.step("Installing dependencies...");
        match self.attempt(self.toolchain.pub_get(&outcome.project_dir)).await {
            Ok(()) => reporter.done("Dependencies installed"),
            Err(reason) => warn(
                &mut outcome,
                reporter,
                format!("Dependency installation failed: {}", reason),
            ),
        }

        reporter.step("Initializing git repository...");
        match self.init_git(&outcome.project_dir).await {
            Ok(()) => reporter.done("Created initial commit"),
            Err(reason) => warn(
                &mut outcome,
                reporter,
                format!("Git initialization failed: {}", reason),
            ),
        }

        outcome.stage = Stage::Finished;
        Ok(outcome)
    }

    async fn bootstrap(&self, config: &ScaffoldConfig) -> Result<()> {
        let invocation = self.toolchain.create(&self.workspace, config);
        let output = self
            .runner
            .run(&invocation)
            .await
            .map_err(|source| ScaffoldError::Spawn {
                command: invocation.to_string(),
                source,
            })?;

        if !output.success {
            return Err(ScaffoldError::Bootstrap {
                command: invocation.to_string(),
                status: output.status_text(),
                diagnostic: output.diagnostic(),
            });
        }
        Ok(())
    }

    async fn write_structure(
        &self,
        bundle: &TemplateBundle,
        config: &ScaffoldConfig,
        outcome: &mut ScaffoldOutcome,
    ) -> Result<()> {
        let root = outcome.project_dir.clone();

        let directories = plan_directories(bundle);
        for dir in &directories {
            let path = root.join(dir);
            fs::create_dir_all(&path)
                .await
                .map_err(|e| ScaffoldError::io("create", path, e))?;
        }
        for leaf in leaf_directories(&directories) {
            let placeholder = format!("{}/{}", leaf, PLACEHOLDER_FILE);
            write_file(&root, &placeholder, "").await?;
            outcome.files.push(placeholder);
        }

        let ctx = StubContext {
            project_name: config.project_name.trim().to_string(),
            package_name: outcome.package_name.clone(),
            description: config.description.clone(),
            template: bundle.id,
        };
        for stub in bundle.render_stubs(&ctx) {
            write_file(&root, &stub.path, &stub.content).await?;
            outcome.files.push(stub.path);
        }

        for (path, content) in AUX_FILES {
            write_file(&root, path, content).await?;
            outcome.files.push(path.to_string());
        }

        outcome.directories = directories;
        Ok(())
    }

    /// Returns how many dependency entries were merged
    async fn merge_manifest(
        &self,
        config: &ScaffoldConfig,
        outcome: &mut ScaffoldOutcome,
    ) -> Result<usize> {
        let path = outcome.project_dir.join(MANIFEST_FILE);
        let existing = match fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(ScaffoldError::io("read", path, e)),
        };

        let set = dependencies::build(outcome.template, config.flags);
        let merged = manifest::merge(&existing, &set, outcome.template, &self.generator_version)?;
        fs::write(&path, &merged.text)
            .await
            .map_err(|e| ScaffoldError::io("write", path, e))?;

        outcome.files.push(MANIFEST_FILE.to_string());
        outcome.merge_report = merged.report;
        Ok(set.dependencies.len() + set.dev_dependencies.len())
    }

    /// `git init`, `git add .`, `git commit`; stops at the first failure
    async fn init_git(&self, project_dir: &Path) -> std::result::Result<(), String> {
        let message = self.product.commit_message();
        let steps = [
            self.toolchain.git_init(project_dir),
            self.toolchain.git_add_all(project_dir),
            self.toolchain.git_commit(project_dir, &message),
        ];
        for invocation in steps {
            self.attempt(invocation).await?;
        }
        Ok(())
    }

    /// Run a non-fatal command, describing the failure if there is one
    async fn attempt(&self, invocation: Invocation) -> std::result::Result<(), String> {
        match self.runner.run(&invocation).await {
            Ok(output) if output.success => Ok(()),
            Ok(output) => {
                let diagnostic = output.diagnostic();
                let mut reason = format!("`{}` ({})", invocation, output.status_text());
                if !diagnostic.is_empty() {
                    reason.push('\n');
                    reason.push_str(&diagnostic);
                }
                Err(reason)
            }
            Err(e) => Err(format!("`{}` could not be started: {}", invocation, e)),
        }
    }
}

fn warn<P: Reporter>(outcome: &mut ScaffoldOutcome, reporter: &mut P, message: String) {
    reporter.warning(&message);
    outcome.warnings.push(message);
}

/// Write `content` to `root/relative`, creating parent directories and
/// overwriting any existing file
async fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::io("create", parent, e))?;
    }
    fs::write(&path, content)
        .await
        .map_err(|e| ScaffoldError::io("write", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ProcessOutput;
    use std::cell::RefCell;
    use std::io;

    #[derive(Clone)]
    struct TestProduct;

    impl ProductConfig for TestProduct {
        fn display_name(&self) -> &'static str {
            "Test Scaffold"
        }
        fn docs_url(&self) -> &'static str {
            "https://example.com"
        }
        fn flutter_program_env(&self) -> &'static str {
            "SCAFFOLD_CORE_UNIT_TEST_FLUTTER"
        }
        fn next_steps(&self, _dir: &Path, _config: &ScaffoldConfig) -> Vec<String> {
            Vec::new()
        }
    }

    /// Replays canned results in order and records what was run
    #[derive(Default)]
    struct Scripted {
        results: RefCell<Vec<io::Result<ProcessOutput>>>,
        calls: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(results: Vec<io::Result<ProcessOutput>>) -> Self {
            Self {
                results: RefCell::new(results.into_iter().rev().collect()),
                calls: RefCell::default(),
            }
        }
    }

    impl CommandRunner for Scripted {
        async fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
            self.calls.borrow_mut().push(invocation.to_string());
            self.results
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Ok(ProcessOutput::ok()))
        }
    }

    #[derive(Default)]
    struct Silent;

    impl Reporter for Silent {
        fn step(&mut self, _message: &str) {}
        fn done(&mut self, _message: &str) {}
        fn warning(&mut self, _message: &str) {}
    }

    fn scaffolder(runner: Scripted, workspace: &Path) -> Scaffolder<TestProduct, Scripted> {
        Scaffolder::new(TestProduct, runner, workspace)
            .with_toolchain(Toolchain::new("flutter", "git"))
    }

    #[test]
    fn test_stages_are_ordered() {
        assert!(Stage::Start < Stage::Bootstrapped);
        assert!(Stage::ManifestMerged < Stage::Finished);
    }

    #[tokio::test]
    async fn test_attempt_describes_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut failed = ProcessOutput::failed(69, "");
        failed.stdout = "Could not resolve host: pub.dev\n".to_string();
        let runner = Scripted::new(vec![
            Ok(failed),
            Err(io::Error::from(io::ErrorKind::NotFound)),
        ]);
        let scaffolder = scaffolder(runner, dir.path());

        let reason = scaffolder
            .attempt(Invocation::new("flutter", dir.path()).args(["pub", "get"]))
            .await
            .unwrap_err();
        assert_eq!(
            reason,
            "`flutter pub get` (exit code 69)\nCould not resolve host: pub.dev"
        );

        let reason = scaffolder
            .attempt(Invocation::new("git", dir.path()).arg("init"))
            .await
            .unwrap_err();
        assert!(reason.starts_with("`git init` could not be started"));
    }

    #[tokio::test]
    async fn test_git_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let runner = Scripted::new(vec![
            Ok(ProcessOutput::ok()),
            Ok(ProcessOutput::failed(128, "fatal: pathspec")),
        ]);
        let scaffolder = scaffolder(runner, dir.path());

        let reason = scaffolder.init_git(dir.path()).await.unwrap_err();
        assert!(reason.contains("git add ."));
        assert_eq!(
            *scaffolder.runner.calls.borrow(),
            vec!["git init".to_string(), "git add .".to_string()]
        );
    }

    #[tokio::test]
    async fn test_blank_name_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let scaffolder = scaffolder(Scripted::default(), dir.path());

        let err = scaffolder
            .run(&ScaffoldConfig::new("   "), &mut Silent)
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingName));
        assert!(scaffolder.runner.calls.borrow().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
