mod advisor;
mod cli;
mod config;
mod garden;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "verdant", version, about = "Plant care companion with AI check-ins and watering reminders")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a new plant from a photo and start tracking it
    Add {
        /// Nickname for the plant (e.g. "Fernie")
        #[arg(long)]
        name: String,
        /// Path to a photo of the plant
        #[arg(long)]
        photo: PathBuf,
    },
    /// Record a watering check-in with a fresh photo
    Checkin {
        /// Plant id or name
        plant: String,
        /// Path to the new photo
        #[arg(long)]
        photo: PathBuf,
    },
    /// List all plants and their reminder status
    List,
    /// Show one plant's details and full history
    Show {
        /// Plant id or name
        plant: String,
    },
    /// Show garden statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level and the data directory)
    let config = config::VerdantConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for command output.
    let filter =
        EnvFilter::try_new(&config.cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Add { name, photo } => {
            cli::add::add(&config, &name, &photo).await?;
        }
        Command::Checkin { plant, photo } => {
            cli::checkin::checkin(&config, &plant, &photo).await?;
        }
        Command::List => {
            cli::list::list(&config)?;
        }
        Command::Show { plant } => {
            cli::show::show(&config, &plant)?;
        }
        Command::Stats => {
            cli::stats::stats(&config)?;
        }
    }

    Ok(())
}
