// src/engine/mod.rs

//! Supervisor engine.
//!
//! This module ties together:
//! - the pure lifecycle state machine ([`state`])
//! - the cooperative shutdown token and OS signal wiring ([`shutdown`])
//! - the async supervisor that drives the pre, run and post groups through
//!   a [`crate::exec::CommandExecutor`] ([`supervisor`])

use crate::exec::CommandOutcome;
use crate::plan::{CommandGroup, CommandSpec};

/// Outcome of one executed command, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub group: CommandGroup,
    /// Position of the command within its group.
    pub index: usize,
    pub command: CommandSpec,
    pub outcome: CommandOutcome,
}

/// How the pre/run part of a lifecycle ended before teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleExit {
    /// Every pre command ran and every run command was joined.
    Completed,
    /// A termination signal (or an explicit trigger) cut the wait short.
    ShutdownRequested,
    /// A command failed under `FailurePolicy::Abort`.
    AbortedOnFailure,
    /// The pre/run part panicked; post commands still ran.
    Panicked,
}

/// What happened during one `Supervisor::execute` call.
///
/// The binary only logs this; command failures never change its exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Pre and post results in list order, run results in completion order.
    pub results: Vec<RunResult>,
    pub exit: LifecycleExit,
    /// Run workers still unjoined when the drain was abandoned.
    pub abandoned: usize,
    pub state: SupervisorState,
}

impl LifecycleReport {
    pub(crate) fn new() -> Self {
        Self {
            results: Vec::new(),
            exit: LifecycleExit::Completed,
            abandoned: 0,
            state: SupervisorState::Idle,
        }
    }

    pub fn group(&self, group: CommandGroup) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(move |r| r.group == group)
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunResult> {
        self.results.iter().filter(|r| !r.outcome.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }
}

pub mod shutdown;
pub mod state;
pub mod supervisor;

pub use shutdown::{install_signal_handlers, Shutdown};
pub use state::{IllegalTransition, Lifecycle, SupervisorState};
pub use supervisor::Supervisor;
