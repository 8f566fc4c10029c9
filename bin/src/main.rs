//! Ronda CLI binary.
//!
//! Event studies on large one-day moves and pre-earnings run-up scans.

mod cmd;
mod data;
mod output;
mod query;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::ask::{AskArgs, run_ask};
use cmd::event::{EventArgs, run_event};
use cmd::runup::{RunupArgs, run_runup};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Event studies and pre-earnings run-up scans", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward returns after large one-day moves
    Event(EventArgs),

    /// Answer a free-text event question, e.g. "7% drop on TSLA next 3 days"
    Ask(AskArgs),

    /// Rank pre-earnings run-up lookbacks across tickers
    Runup(RunupArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Event(args) => run_event(args).await?,
        Commands::Ask(args) => run_ask(args).await?,
        Commands::Runup(args) => run_runup(args).await?,
    }

    Ok(())
}
