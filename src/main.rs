mod api;
mod cli;
mod config;
mod db;
mod models;
mod services;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::models::Gender;

#[derive(Parser)]
#[command(name = "matchday")]
#[command(about = "Football league backend: fixtures, events, standings and season statistics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Overrides PORT from the environment
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Initialize the database
    InitDb,
    /// Recompute a season's standings from finished matches
    UpdateStandings {
        #[arg(short, long)]
        season: i64,
        #[arg(short, long, value_parser = cli::parse_gender, default_value = "M")]
        gender: Gender,
        /// Cup groups instead of the league table
        #[arg(long)]
        cup: bool,
    },
    /// Print a season's standings
    Standings {
        #[arg(short, long)]
        season: i64,
        #[arg(short, long, value_parser = cli::parse_gender, default_value = "M")]
        gender: Gender,
        #[arg(long)]
        cup: bool,
    },
    /// Print a season's top scorers
    TopScorers {
        #[arg(short, long)]
        season: i64,
        #[arg(short, long, value_parser = cli::parse_gender, default_value = "M")]
        gender: Gender,
    },
    /// Query team statistics
    Team {
        #[arg(short, long)]
        name: String,
    },
    /// Write a season's standings to a CSV file
    ExportStandings {
        #[arg(short, long)]
        season: i64,
        #[arg(short, long, value_parser = cli::parse_gender, default_value = "M")]
        gender: Gender,
        #[arg(long)]
        cup: bool,
        #[arg(short, long, default_value = "data/exports/standings.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();
    let settings = Settings::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { port }) => {
            let settings = settings.with_port(port);
            tracing::info!("Starting Matchday API server on {}", settings.bind_address());
            api::serve(settings).await?;
        }
        Some(Commands::InitDb) => {
            tracing::info!("Initializing database...");
            cli::init_db(&settings).await?;
        }
        Some(Commands::UpdateStandings { season, gender, cup }) => {
            tracing::info!("Updating standings for season {}", season);
            cli::update_standings(&settings, season, gender, cup).await?;
        }
        Some(Commands::Standings { season, gender, cup }) => {
            cli::show_standings(&settings, season, gender, cup).await?;
        }
        Some(Commands::TopScorers { season, gender }) => {
            cli::top_scorers(&settings, season, gender).await?;
        }
        Some(Commands::Team { name }) => {
            tracing::info!("Querying team: {}", name);
            cli::query_team(&settings, &name).await?;
        }
        Some(Commands::ExportStandings {
            season,
            gender,
            cup,
            output,
        }) => {
            cli::export_standings(&settings, season, gender, cup, &output).await?;
        }
        None => {
            // Default to serving
            tracing::info!("Starting Matchday API server on {}", settings.bind_address());
            api::serve(settings).await?;
        }
    }

    Ok(())
}
