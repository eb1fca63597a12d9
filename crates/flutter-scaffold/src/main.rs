//! Flutter Scaffold CLI - Opinionated project scaffolding on top of `flutter create`

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use scaffold_core::config::{DEFAULT_DESCRIPTION, DEFAULT_ORGANIZATION, DEFAULT_TEMPLATE};
use scaffold_core::{DependencyFlags, ProductConfig, ScaffoldConfig, ScaffoldError};
use std::path::Path;
use std::process::ExitCode;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for fatal errors, including bad arguments
const EXIT_FATAL: u8 = 1;

/// Flutter Scaffold product configuration
#[derive(Clone)]
pub struct FlutterConfig;

impl ProductConfig for FlutterConfig {
    fn display_name(&self) -> &'static str {
        "Flutter Scaffold"
    }

    fn docs_url(&self) -> &'static str {
        "https://docs.flutter.dev"
    }

    fn flutter_program_env(&self) -> &'static str {
        "FLUTTER_SCAFFOLD_FLUTTER"
    }

    fn next_steps(&self, dir: &Path, config: &ScaffoldConfig) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push("cp .env.example .env".to_string());

        if !config.flags.exclude_firebase {
            steps.push("flutterfire configure".to_string());
        }

        if config.flags.with_tests {
            steps.push("flutter test".to_string());
        }

        steps.push("flutter run".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "flutter-scaffold")]
#[command(about = "CLI for scaffolding Flutter projects with an opinionated layout")]
#[command(version)]
pub struct Args {
    /// Project and directory name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Architecture template (default, mvvm, bloc)
    #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Leave out the Firebase dependencies
    #[arg(long = "no-firebase")]
    pub no_firebase: bool,

    /// Add test tooling to dev_dependencies
    #[arg(long = "with-tests")]
    pub with_tests: bool,

    /// Add analytics dependencies
    #[arg(long = "with-analytics")]
    pub with_analytics: bool,

    /// Project description passed to `flutter create`
    #[arg(long, default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Reverse-domain organization passed to `flutter create`
    #[arg(long, default_value = DEFAULT_ORGANIZATION)]
    pub organization: String,
}

impl TryFrom<Args> for ScaffoldConfig {
    type Error = ScaffoldError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let name = args
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .ok_or(ScaffoldError::MissingName)?;

        Ok(ScaffoldConfig {
            project_name: name,
            template: args.template,
            organization: args.organization,
            description: args.description,
            flags: DependencyFlags {
                exclude_firebase: args.no_firebase,
                with_tests: args.with_tests,
                with_analytics: args.with_analytics,
            },
        })
    }
}

/// `--help` and `--version` are successful exits; anything else clap rejects is fatal
fn parse_error_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => EXIT_FATAL,
    }
}

fn fail(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), message);
    eprintln!();
    eprintln!("{}", Args::command().render_usage());
    eprintln!("For more information, try '--help'.");
    ExitCode::from(EXIT_FATAL)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // clap's rendering already includes the usage line
            let _ = err.print();
            return ExitCode::from(parse_error_code(&err));
        }
    };

    let scaffold = match ScaffoldConfig::try_from(args) {
        Ok(scaffold) => scaffold,
        Err(err) => return fail(err),
    };

    let config = FlutterConfig;
    let result = scaffold_core::run(&config, scaffold, CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => fail(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("flutter-scaffold").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = ScaffoldConfig::try_from(parse(&["-n", "DemoApp"]).unwrap()).unwrap();
        assert_eq!(config, ScaffoldConfig::new("DemoApp"));
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--name",
            "shop",
            "-t",
            "BLOC",
            "--no-firebase",
            "--with-tests",
            "--with-analytics",
            "--description",
            "Shop front",
            "--organization",
            "dev.acme",
        ])
        .unwrap();
        let config = ScaffoldConfig::try_from(args).unwrap();

        assert_eq!(config.project_name, "shop");
        assert_eq!(config.template_id(), scaffold_core::TemplateId::Bloc);
        assert_eq!(config.description, "Shop front");
        assert_eq!(config.organization, "dev.acme");
        assert_eq!(
            config.flags,
            DependencyFlags {
                exclude_firebase: true,
                with_tests: true,
                with_analytics: true,
            }
        );
    }

    #[test]
    fn test_missing_or_blank_name_is_rejected() {
        for args in [&[][..], &["--name", ""][..], &["-n", "   "][..]] {
            let err = ScaffoldConfig::try_from(parse(args).unwrap()).unwrap_err();
            assert!(matches!(err, ScaffoldError::MissingName));
        }
    }

    #[test]
    fn test_parse_error_codes() {
        let help = parse(&["--help"]).unwrap_err();
        assert_eq!(parse_error_code(&help), 0);

        let version = parse(&["--version"]).unwrap_err();
        assert_eq!(parse_error_code(&version), 0);

        let unknown = parse(&["-n", "x", "--frobnicate"]).unwrap_err();
        assert_eq!(parse_error_code(&unknown), EXIT_FATAL);

        let missing_value = parse(&["--name"]).unwrap_err();
        assert_eq!(parse_error_code(&missing_value), EXIT_FATAL);
    }

    #[test]
    fn test_next_steps_follow_flags() {
        let dir = Path::new("/nonexistent/DemoApp");
        let mut config = ScaffoldConfig::new("DemoApp");
        let steps = FlutterConfig.next_steps(dir, &config);
        assert_eq!(steps[0], "cd /nonexistent/DemoApp");
        assert!(steps.contains(&"flutterfire configure".to_string()));
        assert!(!steps.contains(&"flutter test".to_string()));

        config.flags.exclude_firebase = true;
        config.flags.with_tests = true;
        let steps = FlutterConfig.next_steps(dir, &config);
        assert!(!steps.contains(&"flutterfire configure".to_string()));
        assert_eq!(steps.last().map(String::as_str), Some("flutter run"));
        assert!(steps.contains(&"flutter test".to_string()));
    }
}
