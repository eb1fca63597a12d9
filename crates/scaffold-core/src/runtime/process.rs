//! Running external programs

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// One external program call: what to run and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Renders the command line the way a user would type it
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_word(arg))?;
        }
        Ok(())
    }
}

fn shell_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@^+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Captured result of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stderr: stderr.into(),
            ..Default::default()
        }
    }

    /// Text to show the user when the program failed: stderr, or stdout if
    /// stderr is empty
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }

    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external programs to completion
///
/// An `Err` means the program could not be started at all; a program that
/// ran and failed is reported through [`ProcessOutput::success`].
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

/// Runs programs as child processes, waiting for each with no timeout
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let output = TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(ProcessOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display_quotes_when_needed() {
        let invocation = Invocation::new("flutter", "/tmp")
            .args(["create", "--org", "com.example"])
            .arg("--description")
            .arg("A new project")
            .arg("DemoApp");
        assert_eq!(
            invocation.to_string(),
            "flutter create --org com.example --description 'A new project' DemoApp"
        );

        let commit = Invocation::new("git", "/tmp").args(["commit", "-m", "it's done"]);
        assert_eq!(commit.to_string(), r"git commit -m 'it'\''s done'");
    }

    #[test]
    fn test_diagnostic_prefers_stderr() {
        let mut output = ProcessOutput::failed(1, "  boom\n");
        output.stdout = "noise".to_string();
        assert_eq!(output.diagnostic(), "boom");

        output.stderr = "\n".to_string();
        assert_eq!(output.diagnostic(), "noise");
        assert_eq!(output.status_text(), "exit code 1");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_output() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = Invocation::new("sh", dir.path())
            .arg("-c")
            .arg("pwd; echo oops >&2; exit 3");
        let output = SystemRunner.run(&invocation).await.unwrap();

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.diagnostic(), "oops");
        let pwd = std::path::PathBuf::from(output.stdout.trim());
        assert_eq!(
            pwd.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[tokio::test]
    async fn test_system_runner_reports_missing_program() {
        let invocation = Invocation::new("definitely-not-a-real-program-4821", ".");
        let err = SystemRunner.run(&invocation).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
