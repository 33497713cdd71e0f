//! Post-setup commands: git initialization and dependency installation
//!
//! Commands run one after another in the project directory with the terminal's stdio
//! inherited. The first failure stops the sequence.

use crate::error::ScaffoldError;
use anyhow::Result;
use std::fmt;
use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Commit message for the initial git commit
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

/// An external command to run inside the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl SetupCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for SetupCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Executes setup commands
pub trait CommandRunner {
    /// Run `command` with `cwd` as working directory, failing on a non-zero exit
    fn run(&self, command: &SetupCommand, cwd: &Path) -> impl Future<Output = Result<()>>;
}

/// Runs commands as child processes sharing the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &SetupCommand, cwd: &Path) -> Result<()> {
        tracing::debug!(%command, cwd = %cwd.display(), "running setup command");

        let status = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "failed to spawn setup command");
                ScaffoldError::CommandFailed {
                    command: command.to_string(),
                    code: None,
                }
            })?;

        if !status.success() {
            return Err(ScaffoldError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
            }
            .into());
        }

        Ok(())
    }
}

/// `git init`, `git add .`, `git commit -m "Initial commit"`
pub fn git_init_commands() -> Vec<SetupCommand> {
    vec![
        SetupCommand::new("git", &["init"]),
        SetupCommand::new("git", &["add", "."]),
        SetupCommand::new("git", &["commit", "-m", INITIAL_COMMIT_MESSAGE]),
    ]
}

/// `<package manager> install`
pub fn install_command(package_manager: &str) -> SetupCommand {
    SetupCommand::new(package_manager, &["install"])
}

/// Run `commands` in order, stopping at the first failure
pub async fn run_all<R: CommandRunner>(
    runner: &R,
    commands: &[SetupCommand],
    cwd: &Path,
) -> Result<()> {
    for command in commands {
        runner.run(command, cwd).await?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records commands instead of running them; can fail on a chosen program
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub calls: Mutex<Vec<(SetupCommand, PathBuf)>>,
        pub fail_on: Option<String>,
    }

    impl RecordingRunner {
        pub fn failing_on(program: &str) -> Self {
            Self {
                fail_on: Some(program.to_string()),
                ..Default::default()
            }
        }

        pub fn commands(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(command, _)| command.to_string())
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, command: &SetupCommand, cwd: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push((command.clone(), cwd.to_path_buf()));
            if self.fail_on.as_deref() == Some(command.program.as_str()) {
                return Err(ScaffoldError::CommandFailed {
                    command: command.to_string(),
                    code: Some(1),
                }
                .into());
            }
            Ok(())
        }
    }
}
