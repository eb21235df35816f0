//! Healthboard Entry Point

use anyhow::Context;
use clap::Parser;
use healthboard::bootstrap::{self, InitContext};
use healthboard::cli::serve::ServeArgs;
use healthboard::cli::{check, Cli, Commands};
use healthboard::config::BoardConfig;
use healthboard::{logging, server};
use std::time::Duration;
use tracing::{info, warn};

/// How long to wait for in-flight background jobs after the server stops
const SCHEDULER_STOP_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init().context("failed to initialize logging")?;

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    match cli.command {
        Some(Commands::Serve(args)) => run_server(config, args).await,
        Some(Commands::Check(args)) => {
            let InitContext { scheduler, .. } = bootstrap::initialize(config)?;
            let output = check::execute(&args, &scheduler).await?;
            println!("{}", output);
            Ok(())
        }
        None => {
            // No subcommand - default to serve
            let args = ServeArgs::from_env().unwrap_or_else(|e| e.exit());
            run_server(config, args).await
        }
    }
}

async fn run_server(config: BoardConfig, args: ServeArgs) -> anyhow::Result<()> {
    let InitContext { state, scheduler } = bootstrap::initialize(config)?;
    let shutdown = state.shutdown.clone();

    let jobs = scheduler.start(shutdown.clone());
    let result = server::run(state, &args.bind_addr()).await;

    shutdown.request_shutdown();
    match tokio::time::timeout(SCHEDULER_STOP_TIMEOUT, jobs).await {
        Ok(Ok(())) => info!("Background jobs stopped"),
        Ok(Err(e)) => warn!("Background jobs ended abnormally: {}", e),
        Err(_) => warn!("Background jobs did not stop within {:?}", SCHEDULER_STOP_TIMEOUT),
    }

    result.with_context(|| format!("server on {} failed", args.bind_addr()))
}
