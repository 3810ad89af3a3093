//! Marquee CLI - Headless Lifecycle Scenario Runner
//!
//! Features:
//! - Scenario playback: drive a lifecycle controller over the simulated
//!   engine and report the resulting call log, states, and snapshot
//! - Source validation: check that configured sources resolve to a format

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Marquee CLI - playback lifecycle toolkit
#[derive(Parser)]
#[command(name = "marquee-cli")]
#[command(version)]
#[command(about = "Playback lifecycle scenario runner and source validator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a lifecycle scenario against the simulated engine
    Run {
        /// Path to a scenario file (JSON)
        scenario: PathBuf,

        /// Emit a JSON report instead of text
        #[arg(long)]
        json: bool,

        /// Pause between lifecycle events, in milliseconds
        #[arg(long, default_value = "0")]
        step_delay_ms: u64,
    },

    /// Validate the source list of a scenario or config file
    Validate {
        /// Path to a config file (JSON)
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(level)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            json,
            step_delay_ms,
        } => {
            commands::run(&scenario, json, step_delay_ms).await?;
        }
        Commands::Validate { config } => {
            commands::validate(&config)?;
        }
    }

    Ok(())
}
