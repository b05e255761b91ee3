// src/engine/state.rs

//! Pure lifecycle state machine.
//!
//! [`Lifecycle`] tracks which phase a supervisor invocation is in and refuses
//! out-of-order transitions. Its main job is the teardown guard:
//! [`Lifecycle::begin_teardown`] succeeds exactly once, no matter which phase
//! the invocation was interrupted in. No Tokio, no IO.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    RunningPre,
    RunningConcurrent,
    Draining,
    RunningPost,
    Done,
}

impl fmt::Display for SupervisorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SupervisorState::Idle => "idle",
            SupervisorState::RunningPre => "running-pre",
            SupervisorState::RunningConcurrent => "running-concurrent",
            SupervisorState::Draining => "draining",
            SupervisorState::RunningPost => "running-post",
            SupervisorState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Rejected transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalTransition {
    pub from: SupervisorState,
    pub to: SupervisorState,
}

impl fmt::Display for IllegalTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal lifecycle transition {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for IllegalTransition {}

#[derive(Debug)]
pub struct Lifecycle {
    state: SupervisorState,
    teardown_started: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: SupervisorState::Idle,
            teardown_started: false,
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state
    }

    pub fn teardown_started(&self) -> bool {
        self.teardown_started
    }

    /// Move forward along the happy path:
    /// `Idle -> RunningPre -> RunningConcurrent -> Draining`.
    ///
    /// Teardown and completion have their own entry points.
    pub fn advance(&mut self, next: SupervisorState) -> Result<(), IllegalTransition> {
        use SupervisorState::*;

        let legal = matches!(
            (self.state, next),
            (Idle, RunningPre) | (RunningPre, RunningConcurrent) | (RunningConcurrent, Draining)
        );

        if !legal {
            return Err(IllegalTransition {
                from: self.state,
                to: next,
            });
        }

        self.state = next;
        Ok(())
    }

    /// Enter `RunningPost`.
    ///
    /// Legal from every state before teardown. Returns `true` the first time
    /// and `false` on every later call, so the post group is entered at most
    /// once per lifecycle.
    pub fn begin_teardown(&mut self) -> bool {
        if self.teardown_started {
            return false;
        }

        match self.state {
            SupervisorState::RunningPost | SupervisorState::Done => false,
            _ => {
                self.teardown_started = true;
                self.state = SupervisorState::RunningPost;
                true
            }
        }
    }

    /// `RunningPost -> Done`.
    pub fn finish(&mut self) -> Result<(), IllegalTransition> {
        if self.state != SupervisorState::RunningPost {
            return Err(IllegalTransition {
                from: self.state,
                to: SupervisorState::Done,
            });
        }
        self.state = SupervisorState::Done;
        Ok(())
    }
}
