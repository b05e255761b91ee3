// tests/cli_args.rs

use process_starter::cli::parse_from;
use process_starter::plan::CommandSpec;
use process_starter::types::FailurePolicy;

#[test]
fn no_arguments_is_a_usage_error() {
    assert!(parse_from(["process-starter"]).is_none());
    assert!(parse_from(Vec::<String>::new()).is_none());
}

#[test]
fn each_flag_takes_zero_or_more_commands() {
    let args = parse_from([
        "process-starter",
        "--pre",
        "build",
        "lint",
        "-r",
        "watch",
        "serve",
        "--post",
    ])
    .unwrap();

    let plan = args.command_plan();
    assert_eq!(plan.pre, vec![CommandSpec::new("build"), CommandSpec::new("lint")]);
    assert_eq!(plan.run, vec![CommandSpec::new("watch"), CommandSpec::new("serve")]);
    assert!(plan.post.is_empty());
}

#[test]
fn repeated_flags_accumulate_in_order() {
    let args = parse_from([
        "process-starter",
        "--post",
        "first",
        "--run",
        "server",
        "--post",
        "second",
    ])
    .unwrap();

    assert_eq!(args.post, vec!["first", "second"]);
}

#[test]
fn scalar_flags_are_parsed() {
    let args = parse_from([
        "process-starter",
        "--on-failure",
        "abort",
        "--shell",
        "bash",
        "--log-level",
        "debug",
        "--dry-run",
    ])
    .unwrap();

    assert_eq!(args.on_failure, Some(FailurePolicy::Abort));
    assert_eq!(args.shell.as_deref(), Some("bash"));
    assert!(args.dry_run);
    assert!(args.command_plan().is_empty());
}
