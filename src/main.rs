//! CLI entry point for the multi-provider weather service.
//!
//! `serve` runs the HTTP endpoint; `lookup` performs a single aggregation
//! from the command line.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use multiweather::{
    aggregator::Aggregator,
    api::{AppState, WeatherReport, app_router},
    city::City,
    config::Config,
    providers, telemetry,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "multiweather")]
#[command(about = "Average a city's temperature across weather providers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve GET /weather/{city} over HTTP
    Serve {
        /// Address to listen on (overrides WEATHER_LISTEN_ADDR)
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Look up one city and print the JSON report
    Lookup {
        /// City name, e.g. "Tokyo"
        #[arg(value_name = "CITY")]
        city: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let _log_guard = telemetry::init_tracing(&config.log_file_path);

    let aggregator = Aggregator::new(providers::configured(&config)?, config.provider_timeout)
        .context("Set API_KEY_OpenWeatherMap and/or API_KEY_WeatherUnderground")?;
    info!(
        providers = ?aggregator.provider_names(),
        timeout = ?config.provider_timeout,
        "Providers ready"
    );

    match cli.command {
        Commands::Serve { listen } => {
            let addr = listen.unwrap_or(config.listen_addr);
            serve(addr, aggregator).await?;
        }
        Commands::Lookup { city } => {
            let begin = Instant::now();
            let city = City::parse(&city)?;
            let celsius = aggregator.temperature(&city).await?;

            let report = WeatherReport {
                city: city.to_string(),
                celsius,
                took: format!("{:?}", begin.elapsed()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[tracing::instrument(skip(aggregator))]
async fn serve(addr: SocketAddr, aggregator: Aggregator) -> Result<()> {
    let router = app_router(Arc::new(AppState { aggregator }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
