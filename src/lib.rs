// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod plan;
pub mod types;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile};
use crate::engine::Supervisor;
use crate::errors::{Result, SupervisorError};
use crate::exec::{Shell, ShellExecutor};
use crate::plan::{CommandGroup, CommandPlan};
use crate::types::FailurePolicy;

/// Fully resolved invocation: what to run and how.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub plan: CommandPlan,
    pub policy: FailurePolicy,
    pub shell: Shell,
}

impl Invocation {
    /// Merge CLI arguments with an optional config file.
    ///
    /// CLI scalars win over file values; CLI commands are appended after the
    /// file's commands in every group. A blank `--shell` is rejected the same
    /// way a blank `[config].shell` is.
    pub fn resolve(args: &CliArgs, file: Option<&ConfigFile>) -> Result<Self> {
        if let Some(shell) = &args.shell {
            if shell.trim().is_empty() {
                return Err(SupervisorError::ConfigError(
                    "--shell must not be empty".to_string(),
                ));
            }
        }

        let plan = CommandPlan::merge(file, args.command_plan());

        let policy = args
            .on_failure
            .or_else(|| file.map(|f| f.config.on_failure))
            .unwrap_or_default();

        let shell = args
            .shell
            .clone()
            .or_else(|| file.and_then(|f| f.config.shell.clone()))
            .map(Shell::program)
            .unwrap_or_default();

        Ok(Self {
            plan,
            policy,
            shell,
        })
    }
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - plan / policy / shell resolution
/// - the shell executor
/// - SIGINT / SIGTERM handling and the supervisor lifecycle
///
/// Command failures are logged and never turn into an error here.
pub async fn run(args: CliArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => Some(load_and_validate(path)?),
        None => None,
    };

    let invocation = Invocation::resolve(&args, file.as_ref())?;

    if args.dry_run {
        print_dry_run(&invocation);
        return Ok(());
    }

    let executor = ShellExecutor::new(invocation.shell.clone());
    let supervisor = Supervisor::new(executor, invocation.policy);
    let report = supervisor.execute_with_signals(&invocation.plan).await;

    info!(
        exit = ?report.exit,
        failed = report.failures().count(),
        "process-starter done"
    );
    Ok(())
}

/// Simple dry-run output: print policy, shell and the three groups.
fn print_dry_run(invocation: &Invocation) {
    println!("process-starter dry-run");
    println!("  on_failure = {}", invocation.policy);
    println!(
        "  shell = {} {}",
        invocation.shell.program, invocation.shell.flag
    );

    for group in [CommandGroup::Pre, CommandGroup::Run, CommandGroup::Post] {
        let commands = invocation.plan.group(group);
        println!();
        println!("{group} ({}):", commands.len());
        for cmd in commands {
            println!("  - {cmd}");
        }
    }

    debug!("dry-run complete (no execution)");
}
