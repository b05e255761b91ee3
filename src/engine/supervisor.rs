// src/engine/supervisor.rs

use std::any::Any;
use std::fmt;
use std::ops::ControlFlow;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::exec::{CommandExecutor, CommandOutcome};
use crate::plan::{CommandGroup, CommandPlan};
use crate::types::FailurePolicy;

use super::shutdown::{install_signal_handlers, Shutdown};
use super::state::{Lifecycle, SupervisorState};
use super::{LifecycleExit, LifecycleReport, RunResult};

/// Drives one command plan through pre, run, drain and post.
///
/// Pre and post commands run one at a time on the caller's task. Every run
/// command gets its own Tokio task; the drain joins all of them unless the
/// [`Shutdown`] token fires first. Post commands always run, exactly once,
/// after whatever ended the first part of the lifecycle.
///
/// One supervisor runs one lifecycle at a time; calling `execute`
/// concurrently on the same instance is not supported.
pub struct Supervisor<E: CommandExecutor> {
    executor: Arc<E>,
    policy: FailurePolicy,
}

impl<E: CommandExecutor> fmt::Debug for Supervisor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<E: CommandExecutor> Supervisor<E> {
    pub fn new(executor: E, policy: FailurePolicy) -> Self {
        Self {
            executor: Arc::new(executor),
            policy,
        }
    }

    /// Install SIGINT/SIGTERM handlers, then [`Supervisor::execute`].
    ///
    /// If the handlers cannot be installed the lifecycle still runs, just
    /// without signal-driven early exit.
    pub async fn execute_with_signals(&self, plan: &CommandPlan) -> LifecycleReport {
        let shutdown = Shutdown::new();
        let listener = match install_signal_handlers(shutdown.clone()) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(error = %e, "failed to install signal handlers; continuing without them");
                None
            }
        };

        let report = self.execute(plan, &shutdown).await;

        if let Some(listener) = listener {
            listener.abort();
        }
        report
    }

    /// Run the whole lifecycle for `plan`.
    pub async fn execute(&self, plan: &CommandPlan, shutdown: &Shutdown) -> LifecycleReport {
        let mut lifecycle = Lifecycle::new();
        let mut report = LifecycleReport::new();

        info!(
            pre = plan.pre.len(),
            run = plan.run.len(),
            post = plan.post.len(),
            policy = %self.policy,
            "lifecycle started"
        );

        // A panic anywhere before teardown (e.g. in a custom executor) must
        // not skip the post group.
        let first_part = AssertUnwindSafe(self.run_until_teardown(
            plan,
            shutdown,
            &mut lifecycle,
            &mut report,
        ))
        .catch_unwind()
        .await;
        let exit = match first_part {
            Ok(exit) => exit,
            Err(panic) => {
                error!(
                    state = %lifecycle.state(),
                    panic = %panic_message(panic.as_ref()),
                    "lifecycle panicked before teardown; running post commands"
                );
                LifecycleExit::Panicked
            }
        };
        report.exit = exit;

        // Teardown: the single path into the post group.
        if lifecycle.begin_teardown() {
            debug!(state = %lifecycle.state(), ?exit, "lifecycle phase");
            self.run_post(plan, &mut report).await;
            if let Err(e) = lifecycle.finish() {
                error!(error = %e, "lifecycle out of order");
            }
        }
        report.state = lifecycle.state();

        info!(
            ?exit,
            succeeded = report.succeeded(),
            failed = report.failures().count(),
            abandoned = report.abandoned,
            "lifecycle finished"
        );

        report
    }

    async fn run_until_teardown(
        &self,
        plan: &CommandPlan,
        shutdown: &Shutdown,
        lifecycle: &mut Lifecycle,
        report: &mut LifecycleReport,
    ) -> LifecycleExit {
        self.transition(lifecycle, SupervisorState::RunningPre);
        if let ControlFlow::Break(exit) = self.run_pre(plan, shutdown, report).await {
            return exit;
        }

        self.transition(lifecycle, SupervisorState::RunningConcurrent);
        if shutdown.is_triggered() {
            info!("shutdown requested before run commands started");
            return LifecycleExit::ShutdownRequested;
        }
        let mut workers = self.spawn_run_group(plan);

        self.transition(lifecycle, SupervisorState::Draining);
        self.drain(&mut workers, shutdown, report).await
    }

    async fn run_pre(
        &self,
        plan: &CommandPlan,
        shutdown: &Shutdown,
        report: &mut LifecycleReport,
    ) -> ControlFlow<LifecycleExit> {
        for (index, cmd) in plan.pre.iter().enumerate() {
            let outcome = tokio::select! {
                biased;
                _ = shutdown.triggered() => {
                    info!(
                        group = %CommandGroup::Pre,
                        index,
                        cmd = %cmd,
                        "shutdown requested; skipping remaining pre and all run commands"
                    );
                    return ControlFlow::Break(LifecycleExit::ShutdownRequested);
                }
                outcome = self.executor.run(cmd) => outcome,
            };

            let failed = !outcome.is_success();
            self.record(
                RunResult {
                    group: CommandGroup::Pre,
                    index,
                    command: cmd.clone(),
                    outcome,
                },
                report,
            );

            if failed && self.policy == FailurePolicy::Abort {
                warn!(
                    group = %CommandGroup::Pre,
                    index,
                    "on_failure=abort; skipping remaining pre and all run commands"
                );
                return ControlFlow::Break(LifecycleExit::AbortedOnFailure);
            }
        }

        ControlFlow::Continue(())
    }

    /// Start one worker per run command. No ordering between them.
    fn spawn_run_group(&self, plan: &CommandPlan) -> JoinSet<RunResult> {
        let mut workers = JoinSet::new();

        for (index, cmd) in plan.run.iter().cloned().enumerate() {
            let executor = Arc::clone(&self.executor);
            debug!(group = %CommandGroup::Run, index, cmd = %cmd, "spawning run worker");

            workers.spawn(async move {
                let outcome = executor.run(&cmd).await;
                RunResult {
                    group: CommandGroup::Run,
                    index,
                    command: cmd,
                    outcome,
                }
            });
        }

        workers
    }

    /// Join every run worker, unless shutdown (or an abort) comes first.
    ///
    /// Abandoned workers are detached, not aborted: their processes keep
    /// running and are simply no longer waited for.
    async fn drain(
        &self,
        workers: &mut JoinSet<RunResult>,
        shutdown: &Shutdown,
        report: &mut LifecycleReport,
    ) -> LifecycleExit {
        loop {
            let failed = tokio::select! {
                biased;
                _ = shutdown.triggered() => {
                    report.abandoned = workers.len();
                    info!(
                        abandoned = report.abandoned,
                        "shutdown requested; no longer waiting for run commands"
                    );
                    workers.detach_all();
                    return LifecycleExit::ShutdownRequested;
                }
                joined = workers.join_next() => match joined {
                    None => return LifecycleExit::Completed,
                    Some(Ok(result)) => {
                        let failed = !result.outcome.is_success();
                        self.record(result, report);
                        failed
                    }
                    Some(Err(e)) => {
                        error!(error = %e, "run worker did not finish cleanly");
                        true
                    }
                },
            };

            if failed && self.policy == FailurePolicy::Abort {
                report.abandoned = workers.len();
                warn!(
                    abandoned = report.abandoned,
                    "on_failure=abort; no longer waiting for run commands"
                );
                workers.detach_all();
                return LifecycleExit::AbortedOnFailure;
            }
        }
    }

    /// Every post command runs, in order, whatever happened before.
    async fn run_post(&self, plan: &CommandPlan, report: &mut LifecycleReport) {
        for (index, cmd) in plan.post.iter().enumerate() {
            let outcome = match AssertUnwindSafe(self.executor.run(cmd)).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(panic) => CommandOutcome::LaunchFailed(format!(
                    "executor panicked: {}",
                    panic_message(panic.as_ref())
                )),
            };
            self.record(
                RunResult {
                    group: CommandGroup::Post,
                    index,
                    command: cmd.clone(),
                    outcome,
                },
                report,
            );
        }
    }

    fn record(&self, result: RunResult, report: &mut LifecycleReport) {
        match &result.outcome {
            CommandOutcome::Success => debug!(
                group = %result.group,
                index = result.index,
                cmd = %result.command,
                "command succeeded"
            ),
            CommandOutcome::Failed(code) => warn!(
                group = %result.group,
                index = result.index,
                cmd = %result.command,
                exit_code = *code,
                "command failed"
            ),
            CommandOutcome::LaunchFailed(reason) => warn!(
                group = %result.group,
                index = result.index,
                cmd = %result.command,
                error = %reason,
                "command failed to launch"
            ),
        }
        report.results.push(result);
    }

    fn transition(&self, lifecycle: &mut Lifecycle, next: SupervisorState) {
        match lifecycle.advance(next) {
            Ok(()) => debug!(state = %next, "lifecycle phase"),
            Err(e) => error!(error = %e, "lifecycle out of order"),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
