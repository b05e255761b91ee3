// src/main.rs

use process_starter::{cli, logging, run};

#[tokio::main]
async fn main() {
    let Some(args) = cli::parse() else {
        if let Err(e) = cli::print_help() {
            eprintln!("process-starter error: failed to print help: {e}");
        }
        std::process::exit(1);
    };

    if let Err(err) = run_main(args).await {
        eprintln!("process-starter error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main(args: cli::CliArgs) -> anyhow::Result<()> {
    logging::init_logging(args.log_level)?;
    run(args).await?;
    Ok(())
}
