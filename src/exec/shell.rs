// src/exec/shell.rs

//! Real executor: hands each command to a shell via `tokio::process::Command`.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{error, info};

use crate::exec::backend::{CommandExecutor, CommandOutcome};
use crate::plan::CommandSpec;

/// Command interpreter used as `<program> <flag> <cmd>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub program: String,
    pub flag: String,
}

impl Shell {
    /// A POSIX-style shell invoked as `<program> -c <cmd>`.
    pub fn program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: "-c".to_string(),
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        if cfg!(windows) {
            Self {
                program: "cmd".to_string(),
                flag: "/C".to_string(),
            }
        } else {
            Self::program("sh")
        }
    }
}

/// Executor that spawns one shell process per command.
///
/// stdin, stdout and stderr are inherited so the commands talk to the
/// terminal directly. Children are not killed when their wait is abandoned.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    shell: Shell,
}

impl ShellExecutor {
    pub fn new(shell: Shell) -> Self {
        Self { shell }
    }

    async fn run_command(&self, cmd: &CommandSpec) -> CommandOutcome {
        match self.run_command_inner(cmd).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(cmd = %cmd, error = %format!("{err:#}"), "command could not be run");
                CommandOutcome::LaunchFailed(format!("{err:#}"))
            }
        }
    }

    async fn run_command_inner(&self, cmd: &CommandSpec) -> Result<CommandOutcome> {
        info!(cmd = %cmd, shell = %self.shell.program, "starting command process");

        let mut command = Command::new(&self.shell.program);
        command
            .arg(&self.shell.flag)
            .arg(cmd.as_str())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(false);

        let mut child = command
            .spawn()
            .with_context(|| format!("spawning '{}' for command '{cmd}'", self.shell.program))?;

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for process of command '{cmd}'"))?;

        let code = status.code().unwrap_or(-1);
        info!(
            cmd = %cmd,
            exit_code = code,
            success = status.success(),
            "command process exited"
        );

        Ok(if status.success() {
            CommandOutcome::Success
        } else {
            CommandOutcome::Failed(code)
        })
    }
}

impl CommandExecutor for ShellExecutor {
    fn run<'a>(
        &'a self,
        cmd: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + 'a>> {
        Box::pin(self.run_command(cmd))
    }
}
