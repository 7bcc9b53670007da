mod bulkparse;
mod commands;
mod config;
mod db;
mod importer;
mod inventory;
mod models;
mod utils;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "navseed")]
#[command(about = "Bulk import of NAV seed data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a seed file into the inventory database
    Import(commands::import::ImportArgs),
    /// List the seed file kinds and their columns
    Kinds,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing; stdout is kept for the import report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "navseed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load();

    match cli.command {
        Commands::Import(args) => {
            if !commands::import::execute(args, &cfg).await? {
                std::process::exit(1);
            }
        }
        Commands::Kinds => commands::kinds::execute(),
    }

    Ok(())
}
