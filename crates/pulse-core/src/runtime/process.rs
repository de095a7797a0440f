//! External process invocation
//!
//! Every scaffold, install, and upgrade command goes through a [`ProcessRunner`].
//! The runner starts the process in its working directory, forwards output to the
//! terminal, and folds the result into a [`StepOutcome`]. It never retries and has
//! no visibility into what the child changed on disk.

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

use crate::error::{PulseError, Result};

/// How the child's stdio is wired up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdioMode {
    /// Child shares the operator's terminal
    #[default]
    Inherit,
    /// Stdout/stderr are piped and re-printed indented; stdin stays inherited
    Stream,
}

impl std::str::FromStr for StdioMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inherit" => Ok(StdioMode::Inherit),
            "stream" => Ok(StdioMode::Stream),
            other => Err(other.to_string()),
        }
    }
}

/// A single external command to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    stdio: StdioMode,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            stdio: StdioMode::default(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdio(mut self, stdio: StdioMode) -> Self {
        self.stdio = stdio;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn stdio_mode(&self) -> StdioMode {
        self.stdio
    }

    /// Shell-like rendering for messages, e.g. `pnpm i prettier --save-dev`
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.clone()];
        for arg in &self.args {
            if arg.contains(' ') {
                parts.push(format!("\"{}\"", arg));
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Result of running one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// Process ran and exited non-zero (-1 when terminated by a signal)
    ExitFailure(i32),
    /// Process could not be started
    SpawnFailure(String),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success)
    }

    /// Convert into a `Result`, attributing failures to `invocation`
    pub fn into_result(self, invocation: &Invocation) -> Result<()> {
        match self {
            StepOutcome::Success => Ok(()),
            StepOutcome::ExitFailure(code) => Err(PulseError::NonZeroExit {
                command: invocation.command_line(),
                code,
            }),
            StepOutcome::SpawnFailure(cause) => Err(PulseError::Spawn {
                program: invocation.program().to_string(),
                cause,
            }),
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Success => write!(f, "ok"),
            StepOutcome::ExitFailure(code) => write!(f, "exited with status {}", code),
            StepOutcome::SpawnFailure(cause) => write!(f, "could not start: {}", cause),
        }
    }
}

/// Runs external commands to completion
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    async fn run(&self, invocation: Invocation) -> StepOutcome;
}

/// Runner backed by real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    async fn run(&self, invocation: Invocation) -> StepOutcome {
        tracing::debug!(
            command = %invocation,
            cwd = %invocation.cwd().display(),
            "spawning process"
        );

        let outcome = match invocation.stdio_mode() {
            StdioMode::Inherit => run_inherited(&invocation).await,
            StdioMode::Stream => run_streamed(&invocation).await,
        };

        tracing::debug!(command = %invocation, %outcome, "process finished");
        outcome
    }
}

fn base_command(invocation: &Invocation) -> TokioCommand {
    let mut cmd = TokioCommand::new(invocation.program());
    cmd.args(invocation.arguments()).current_dir(invocation.cwd());
    cmd
}

fn exit_outcome(status: std::process::ExitStatus) -> StepOutcome {
    if status.success() {
        StepOutcome::Success
    } else {
        StepOutcome::ExitFailure(status.code().unwrap_or(-1))
    }
}

async fn run_inherited(invocation: &Invocation) -> StepOutcome {
    let status = base_command(invocation)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match status {
        Ok(status) => exit_outcome(status),
        Err(e) => StepOutcome::SpawnFailure(e.to_string()),
    }
}

async fn run_streamed(invocation: &Invocation) -> StepOutcome {
    let spawned = base_command(invocation)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => return StepOutcome::SpawnFailure(e.to_string()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        let _ = child.kill().await;
        return StepOutcome::SpawnFailure("failed to capture child output".to_string());
    };

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => println!("  {}", line),
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_done = true;
                    }
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_done = true;
                    }
                }
            }
        }
    }

    match child.wait().await {
        Ok(status) => exit_outcome(status),
        Err(e) => StepOutcome::SpawnFailure(format!("failed to wait for process: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_args_with_spaces() {
        let inv = Invocation::new("pnpm", ".").args([
            "husky",
            "add",
            ".husky/pre-commit",
            "pnpm lint-staged",
        ]);
        assert_eq!(
            inv.command_line(),
            "pnpm husky add .husky/pre-commit \"pnpm lint-staged\""
        );
    }

    #[test]
    fn test_outcome_into_result() {
        let inv = Invocation::new("pnpm", ".").args(["i", "husky"]);
        assert!(StepOutcome::Success.into_result(&inv).is_ok());

        let err = StepOutcome::ExitFailure(1).into_result(&inv).unwrap_err();
        assert!(matches!(err, PulseError::NonZeroExit { code: 1, .. }));

        let err = StepOutcome::SpawnFailure("not found".into())
            .into_result(&inv)
            .unwrap_err();
        assert!(err.to_string().contains("failed to start `pnpm`"));
    }

    #[test]
    fn test_stdio_mode_parse() {
        assert_eq!("Stream".parse::<StdioMode>(), Ok(StdioMode::Stream));
        assert_eq!("inherit".parse::<StdioMode>(), Ok(StdioMode::Inherit));
        assert!("tty".parse::<StdioMode>().is_err());
    }

    #[tokio::test]
    async fn test_spawn_failure_for_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("pulse-definitely-not-a-real-binary", dir.path());
        let outcome = SystemRunner.run(inv).await;
        assert!(matches!(outcome, StepOutcome::SpawnFailure(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let ok = Invocation::new("sh", dir.path()).args(["-c", "exit 0"]);
        assert_eq!(SystemRunner.run(ok).await, StepOutcome::Success);

        let failed = Invocation::new("sh", dir.path())
            .args(["-c", "echo out; echo err >&2; exit 7"])
            .stdio(StdioMode::Stream);
        assert_eq!(SystemRunner.run(failed).await, StepOutcome::ExitFailure(7));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_in_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let inv = Invocation::new("sh", dir.path()).args(["-c", "touch marker"]);
        assert!(SystemRunner.run(inv).await.is_success());
        assert!(dir.path().join("marker").exists());
    }
}
