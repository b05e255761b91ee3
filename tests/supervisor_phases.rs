// tests/supervisor_phases.rs

use std::time::Duration;

use process_starter::engine::{LifecycleExit, Shutdown, Supervisor, SupervisorState};
use process_starter::exec::CommandOutcome;
use process_starter::plan::{CommandGroup, CommandPlan};
use process_starter::types::FailurePolicy;
use process_starter_test_utils::{
    init_tracing, with_timeout, CommandPlanBuilder, Event, ScriptedExecutor,
};

#[tokio::test]
async fn empty_plan_spawns_nothing_and_finishes() {
    init_tracing();

    let executor = ScriptedExecutor::new();
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = with_timeout(supervisor.execute(&CommandPlan::default(), &Shutdown::new())).await;

    assert!(executor.events().is_empty());
    assert!(report.results.is_empty());
    assert_eq!(report.exit, LifecycleExit::Completed);
    assert_eq!(report.state, SupervisorState::Done);
}

#[tokio::test]
async fn pre_and_post_run_in_list_order() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .pre("pre-1")
        .pre("pre-2")
        .pre("pre-3")
        .post("post-1")
        .post("post-2")
        .build();

    let executor = ScriptedExecutor::new().delayed("pre-1", Duration::from_millis(30));
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    assert_eq!(
        executor.events(),
        vec![
            Event::Started("pre-1".into()),
            Event::Finished("pre-1".into()),
            Event::Started("pre-2".into()),
            Event::Finished("pre-2".into()),
            Event::Started("pre-3".into()),
            Event::Finished("pre-3".into()),
            Event::Started("post-1".into()),
            Event::Finished("post-1".into()),
            Event::Started("post-2".into()),
            Event::Finished("post-2".into()),
        ]
    );
}

#[tokio::test]
async fn failing_pre_command_does_not_stop_the_lifecycle() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .pre("exit 1")
        .pre("echo after")
        .post("echo done")
        .build();

    let executor = ScriptedExecutor::new().failing("exit 1", 1);
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    assert_eq!(executor.started(), vec!["exit 1", "echo after", "echo done"]);
    assert_eq!(report.exit, LifecycleExit::Completed);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].group, CommandGroup::Pre);
    assert_eq!(failures[0].index, 0);
    assert_eq!(failures[0].outcome, CommandOutcome::Failed(1));

    assert_eq!(report.group(CommandGroup::Post).count(), 1);
}

#[tokio::test]
async fn run_commands_start_together_and_drain_waits_for_all() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .pre("build")
        .run("sleep 5")
        .run("echo fast")
        .post("cleanup")
        .build();

    let executor = ScriptedExecutor::new().delayed("sleep 5", Duration::from_millis(200));
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    // The fast command finishes before the slow one even though it was
    // listed second.
    let finished = executor.finished();
    assert_eq!(finished, vec!["build", "echo fast", "sleep 5", "cleanup"]);

    // Both run commands started before either finished.
    let slow_started = executor.position(&Event::Started("sleep 5".into())).unwrap();
    let fast_started = executor.position(&Event::Started("echo fast".into())).unwrap();
    let fast_finished = executor.position(&Event::Finished("echo fast".into())).unwrap();
    assert!(slow_started < fast_finished);
    assert!(fast_started < fast_finished);

    // Post only starts once the slow run command is done.
    let slow_finished = executor.position(&Event::Finished("sleep 5".into())).unwrap();
    let post_started = executor.position(&Event::Started("cleanup".into())).unwrap();
    assert!(slow_finished < post_started);

    let run: Vec<_> = report.group(CommandGroup::Run).collect();
    assert_eq!(run.len(), 2);
    assert_eq!(run[0].command.as_str(), "echo fast");
    assert_eq!(run[0].index, 1);
    assert_eq!(report.abandoned, 0);
    assert_eq!(report.exit, LifecycleExit::Completed);
}

#[tokio::test]
async fn every_run_command_gets_its_own_worker() {
    init_tracing();

    let mut builder = CommandPlanBuilder::new();
    for i in 0..8 {
        builder = builder.run(&format!("worker-{i}"));
    }
    let plan = builder.build();

    // All eight sleep for the same time; if they ran one after another this
    // would take well over the timeout below.
    let mut executor = ScriptedExecutor::new();
    for i in 0..8 {
        executor = executor.delayed(&format!("worker-{i}"), Duration::from_millis(300));
    }
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = tokio::time::timeout(
        Duration::from_millis(1500),
        supervisor.execute(&plan, &Shutdown::new()),
    )
    .await
    .expect("run commands did not execute concurrently");

    assert_eq!(executor.started().len(), 8);
    assert_eq!(report.group(CommandGroup::Run).count(), 8);
    assert_eq!(report.succeeded(), 8);
}

#[tokio::test]
async fn failing_run_command_does_not_stop_its_peers() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .run("broken")
        .run("slow")
        .post("cleanup")
        .build();

    let executor = ScriptedExecutor::new()
        .failing("broken", 2)
        .delayed("slow", Duration::from_millis(100));
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    assert_eq!(executor.finished(), vec!["broken", "slow", "cleanup"]);
    assert_eq!(report.exit, LifecycleExit::Completed);
    assert_eq!(report.failures().count(), 1);
}

#[tokio::test]
async fn post_runs_even_when_every_post_command_fails() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .post("a")
        .post("b")
        .post("c")
        .build();

    let executor = ScriptedExecutor::new()
        .failing("a", 1)
        .failing("b", 1)
        .failing("c", 1);
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Abort);

    let report = with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    assert_eq!(executor.started(), vec!["a", "b", "c"]);
    assert_eq!(report.failures().count(), 3);
    assert_eq!(report.state, SupervisorState::Done);
}

#[tokio::test]
async fn panicking_pre_command_still_runs_post() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .pre("boom")
        .pre("never")
        .run("server")
        .post("cleanup")
        .build();

    let executor = ScriptedExecutor::new().panicking("boom");
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    assert_eq!(report.exit, LifecycleExit::Panicked);
    assert_eq!(executor.started(), vec!["boom", "cleanup"]);
    assert_eq!(executor.finished(), vec!["cleanup"]);
    assert_eq!(report.group(CommandGroup::Post).count(), 1);
    assert_eq!(report.state, SupervisorState::Done);
}

#[tokio::test]
async fn panicking_post_command_does_not_stop_the_rest_of_post() {
    init_tracing();

    let plan = CommandPlanBuilder::new()
        .run("server")
        .post("boom")
        .post("cleanup")
        .build();

    let executor = ScriptedExecutor::new().panicking("boom");
    let supervisor = Supervisor::new(executor.clone(), FailurePolicy::Continue);

    let report = with_timeout(supervisor.execute(&plan, &Shutdown::new())).await;

    assert_eq!(report.exit, LifecycleExit::Completed);
    assert_eq!(executor.started(), vec!["server", "boom", "cleanup"]);

    let post: Vec<_> = report.group(CommandGroup::Post).collect();
    assert_eq!(post.len(), 2);
    match &post[0].outcome {
        CommandOutcome::LaunchFailed(reason) => assert!(reason.contains("panicked"), "{reason}"),
        other => panic!("expected LaunchFailed, got {other:?}"),
    }
    assert_eq!(post[1].outcome, CommandOutcome::Success);
}
