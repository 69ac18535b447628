use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod services;
mod utils;

use config::Config;
use error::Result;
use services::SimpleServices;

#[derive(Parser)]
#[command(name = "tunedock")]
#[command(about = "Command-line music search and playlist discovery with resilient proxy failover")]
#[command(version)]
#[command(author = "musicdock")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for tracks by song, artist, genre, or playlist link
    Search(cli::search::SearchArgs),

    /// Autocomplete suggestions for a query prefix
    Suggest(cli::suggest::SuggestArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    utils::logging::init_logging(cli.verbose)
        .map_err(error::TuneDockError::Internal)?;

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Initialize services
    let services = SimpleServices::new(config);

    let config = services.config();
    match cli.command {
        Commands::Search(args) => cli::search::execute(args, &services).await
            .map_err(error::TuneDockError::Internal),
        Commands::Suggest(args) => cli::suggest::execute(args, &services).await
            .map_err(error::TuneDockError::Internal),
        Commands::Config(args) => cli::config::execute(args, &config).await,
    }
}
