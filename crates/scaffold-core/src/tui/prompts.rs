//! Charm-style CLI flow using cliclack

use crate::config::ScaffoldConfig;
use crate::product::ProductConfig;
use crate::runtime::{check, CommandRunner, SystemRunner};
use crate::scaffold::{Reporter, ScaffoldOutcome, Scaffolder};
use crate::templates::TemplateId;
use anyhow::{Context, Result};
use cliclack::ProgressBar;
use colored::Colorize;

/// Shows each pipeline step as a cliclack spinner
#[derive(Default)]
pub struct SpinnerReporter {
    spinner: Option<ProgressBar>,
}

impl SpinnerReporter {
    fn finish(&mut self, message: impl std::fmt::Display) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop(message);
        }
    }
}

impl Reporter for SpinnerReporter {
    fn step(&mut self, message: &str) {
        self.finish("");
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.spinner = Some(spinner);
    }

    fn done(&mut self, message: &str) {
        if self.spinner.is_some() {
            self.finish(message);
        } else {
            let _ = cliclack::log::success(message);
        }
    }

    fn warning(&mut self, message: &str) {
        self.finish("Finished with a warning".yellow());
        let _ = cliclack::log::warning(message);
    }

    fn failed(&mut self, message: &str) {
        self.finish(message.red());
        let _ = console::Term::stderr().show_cursor();
    }

    fn info(&mut self, message: &str) {
        let _ = cliclack::log::info(message);
    }
}

/// Run the scaffolding flow in the current directory
pub async fn run<C: ProductConfig>(
    config: &C,
    scaffold: ScaffoldConfig,
    cli_version: &str,
) -> Result<ScaffoldOutcome> {
    cliclack::intro(config.display_name())?;

    let workspace = std::env::current_dir().context("Failed to read the current directory")?;
    let scaffolder = Scaffolder::new(config.clone(), SystemRunner, workspace)
        .with_generator_version(cli_version);

    // Step 1: Check flutter (required) and git (advisory)
    check_tools(&SystemRunner, &scaffolder).await?;

    // Step 2: Announce the template, including any fallback
    let mut reporter = SpinnerReporter::default();
    announce_template(&scaffolder, &scaffold, &mut reporter);

    // Step 3: Generate
    let outcome = scaffolder.run(&scaffold, &mut reporter).await?;

    // Step 4: Summary and next steps
    print_next_steps(config, &scaffold, &outcome)?;

    Ok(outcome)
}

async fn check_tools<C: ProductConfig, R: CommandRunner>(
    runner: &R,
    scaffolder: &Scaffolder<C, SystemRunner>,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking toolchain...");

    match check::check_toolchain(runner, scaffolder.toolchain()).await {
        Ok(tools) => {
            let summary: Vec<String> = tools
                .iter()
                .map(|t| {
                    if t.available {
                        format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
                    } else {
                        format!("{} (not installed)", t.name)
                    }
                })
                .collect();
            spinner.stop(format!("Detected tools: {}", summary.join(", ")));

            for tool in tools.iter().filter(|t| !t.available) {
                cliclack::log::info(format!(
                    "{} not found; the project will be created without a repository (install from {})",
                    tool.name,
                    check::install_hint(tool)
                ))?;
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing tools");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing tools and try again.");
        }
    }
}

fn announce_template<C: ProductConfig>(
    scaffolder: &Scaffolder<C, SystemRunner>,
    scaffold: &ScaffoldConfig,
    reporter: &mut SpinnerReporter,
) {
    let bundle = scaffolder.registry().resolve(&scaffold.template);
    if TemplateId::recognize(&scaffold.template).is_none() {
        reporter.info(&format!(
            "Unknown template '{}', using '{}'",
            scaffold.template.trim(),
            bundle.id
        ));
    }
    reporter.info(&format!("Template: {} - {}", bundle.id, bundle.description));
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    scaffold: &ScaffoldConfig,
    outcome: &ScaffoldOutcome,
) -> Result<()> {
    let steps = config.next_steps(&outcome.project_dir, scaffold);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  {} {}", "Docs:".dimmed(), config.docs_url().cyan());

    if outcome.has_warnings() {
        cliclack::outro(format!(
            "Created {} with {} warning(s); see above",
            outcome.package_name,
            outcome.warnings.len()
        ))?;
    } else {
        cliclack::outro("Happy coding!")?;
    }

    Ok(())
}
