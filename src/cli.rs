// src/cli.rs

//! CLI argument parsing using `clap`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, ValueEnum};

use crate::plan::CommandPlan;
use crate::types::FailurePolicy;

/// Command-line arguments for `process-starter`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "process-starter",
    version,
    about = "Start multiple processes: pre commands in order, run commands concurrently, post commands always.",
    long_about = None,
    after_help = "example:\n  \
        process-starter --run \"your-file-watcher-command\" \"your-dev-server-start-command\"\n  \
        process-starter --pre \"your-build-command\" --run \"your-dev-server-start-command\""
)]
pub struct CliArgs {
    /// Commands executed one by one before the run commands.
    #[arg(long, value_name = "COMMAND", num_args = 0..)]
    pub pre: Vec<String>,

    /// Commands to run concurrently.
    #[arg(long, short = 'r', value_name = "COMMAND", num_args = 0..)]
    pub run: Vec<String>,

    /// Commands executed one by one after the run commands, even on SIGINT/SIGTERM.
    #[arg(long, value_name = "COMMAND", num_args = 0..)]
    pub post: Vec<String>,

    /// TOML file with `[commands]` and `[config]` sections.
    ///
    /// Its commands run before the ones given on the command line.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when a pre or run command fails (continue, abort).
    ///
    /// Overrides `[config].on_failure`. Default: continue.
    #[arg(long, value_name = "POLICY")]
    pub on_failure: Option<FailurePolicy>,

    /// Shell program used as `<shell> -c <command>`.
    ///
    /// Overrides `[config].shell`. Default: `sh` (`cmd /C` on Windows).
    #[arg(long, value_name = "PROGRAM")]
    pub shell: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PROCESS_STARTER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the resolved command groups, but don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The command groups given directly on the command line.
    pub fn command_plan(&self) -> CommandPlan {
        CommandPlan::new(
            self.pre.iter().map(String::as_str),
            self.run.iter().map(String::as_str),
            self.post.iter().map(String::as_str),
        )
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse `std::env::args_os()`.
///
/// Returns `None` when the program was invoked without any arguments, which
/// is a usage error: the caller prints help and exits non-zero.
pub fn parse() -> Option<CliArgs> {
    parse_from(std::env::args_os())
}

/// Like [`parse`], for an explicit argument list (first item is the binary name).
///
/// Invalid arguments make clap print its error and exit, as usual.
pub fn parse_from<I, T>(args: I) -> Option<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    if args.len() <= 1 {
        return None;
    }
    Some(CliArgs::parse_from(args))
}

pub fn print_help() -> std::io::Result<()> {
    CliArgs::command().print_help()
}
