use mlp_deploy::cli::Cli;
use mlp_deploy::commands;
use mlp_deploy::logger::initialize as LoggerInitialize;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs land next to the cache so CI runners don't need a writable cwd
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("mlp-deploy");

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {}: {e}", log_dir.display());
        return ExitCode::FAILURE;
    }

    if let Err(e) = LoggerInitialize(&log_dir) {
        eprintln!("Failed to initialize logger: {e}");
        return ExitCode::FAILURE;
    }

    info!("mlp-deploy starting");

    match commands::deploy::run(&cli).await {
        Ok(()) => {
            info!("Deployment completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
