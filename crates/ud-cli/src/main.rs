//! userdir: terminal front end for the user directory.
//!
//! Entry point and error handling boundary. Uses `anyhow` for error
//! propagation and user-facing messages.

mod cli;
mod commands;
mod render;

use std::io;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::args::Cli;
use cli::console::Console;
use ud_core::config::AppConfig;
use ud_services::UserService;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {err:#}", "Error:".red().bold());
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Before parsing so clap's env fallbacks see .env values too
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let mut config = AppConfig::from_env()?;
    cli.apply(&mut config);

    let store = ud_store::connect(&config.store)?;
    let service = Arc::new(UserService::new(store));

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    commands::dispatch(cli.command, service, &mut console).await
}

/// Diagnostics go to stderr so they never mix with command output
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(io::stderr),
        )
        .init();
}
