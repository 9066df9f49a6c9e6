use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod utils;

use cli::{interactive, recommend};
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "tunedive")]
#[command(about = "Find song recommendations from YouTube Music and Spotify")]
#[command(version)]
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
    /// Fetch recommendations for a song
    Recommend(recommend::RecommendArgs),

    /// Start an interactive recommendation session
    Interactive(interactive::InteractiveArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::init_logging(cli.verbose)
        .map_err(error::TunediveError::Internal)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Recommend(args) => recommend::execute(args, &config).await
            .map_err(error::TunediveError::Internal),
        Commands::Interactive(args) => interactive::execute(args, &config).await
            .map_err(error::TunediveError::Internal),
        Commands::Config(args) => cli::config::execute(args, &config).await
            .map_err(error::TunediveError::Internal),
    }
}
