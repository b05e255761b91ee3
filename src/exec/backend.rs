// src/exec/backend.rs

//! Pluggable command executor abstraction.
//!
//! The supervisor talks to a `CommandExecutor` instead of spawning processes
//! itself. Production code uses [`super::ShellExecutor`]; tests can provide
//! their own implementation that records invocations and scripts outcomes
//! without touching the OS.

use std::future::Future;
use std::pin::Pin;

use crate::plan::CommandSpec;

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit status 0.
    Success,
    /// Non-zero exit status. `-1` when the process was terminated by a
    /// signal and has no exit code.
    Failed(i32),
    /// The process could not be spawned or waited on.
    LaunchFailed(String),
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success)
    }

    /// Exit code as reported by the process, if it got far enough to have one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandOutcome::Success => Some(0),
            CommandOutcome::Failed(code) => Some(*code),
            CommandOutcome::LaunchFailed(_) => None,
        }
    }
}

/// Runs one command to completion.
///
/// Implementations must never fail: spawn or wait errors are reported as
/// [`CommandOutcome::LaunchFailed`]. Dropping the returned future abandons
/// the wait; it is not a request to kill the process.
pub trait CommandExecutor: Send + Sync + 'static {
    fn run<'a>(
        &'a self,
        cmd: &'a CommandSpec,
    ) -> Pin<Box<dyn Future<Output = CommandOutcome> + Send + 'a>>;
}
