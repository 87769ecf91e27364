use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use weatherwise::api::AppState;
use weatherwise::discovery::{
    DiscoveryResponse, DiscoveryService, format_distance, open_status_text,
};
use weatherwise::{Providers, WeatherWiseConfig, logging, web};

#[derive(Debug, Parser)]
#[command(name = "weatherwise")]
#[command(about = "Weather-aware recommendations for nearby places", version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Rank places around a coordinate and print them
    Discover {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Free-text filter such as "pizza" or "museum"
        #[arg(short, long)]
        query: Option<String>,
        /// Number of places to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config =
        WeatherWiseConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let providers = Providers::from_config(&config)?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::new(&providers, config.places.search_radius_m);
            web::run(&config.server, state).await?;
        }
        Commands::Discover {
            lat,
            lng,
            query,
            limit,
        } => {
            let service =
                DiscoveryService::from_providers(&providers, config.places.search_radius_m);
            let response = service
                .discover(lat, lng, query.as_deref())
                .await
                .context("Failed to fetch recommendations")?;
            print_discovery(&response, limit);
        }
    }

    Ok(())
}

fn print_discovery(response: &DiscoveryResponse, limit: usize) {
    let weather = &response.weather;
    println!(
        "{} {} {:.0}°C, {} ({})",
        weather.category.emoji(),
        weather.condition,
        weather.temperature,
        weather.description,
        response.timezone
    );
    println!("Local time: {}", response.local_time);
    println!();

    if response.recommendations.is_empty() {
        println!("No places found nearby.");
        return;
    }

    for (rank, scored) in response.recommendations.iter().take(limit).enumerate() {
        println!(
            "{:>2}. {} [{}] {} - {}",
            rank + 1,
            scored.place.name,
            scored.score,
            format_distance(scored.distance),
            open_status_text(scored.is_open)
        );
        println!("    {}", scored.explanation);
    }
}
