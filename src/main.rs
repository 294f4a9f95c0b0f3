mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod simulator;
mod ussd;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, SimulateArgs};
use config::Config;
use datasources::OpenWeatherMapClient;
use error::Result;
use logic::{summarize_days, AdviceEngine, FORECAST_DAYS};
use models::Language;
use simulator::GatewaySimulator;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use ussd::{InMemorySessionStore, UssdService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for USSD screens and JSON
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Simulate(SimulateArgs::default()));

    if let Commands::Init = command {
        let (_, path) = Config::setup_interactive()?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    if !Config::exists(cli.config.as_ref()) {
        eprintln!("No config file found.");
        eprintln!("Run `farmweather init` or copy config/config.yaml.example to config/config.yaml");
        std::process::exit(1);
    }

    let config = match Config::load(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Loaded config: {:?}", config);

    let client = Arc::new(OpenWeatherMapClient::new(config.openweathermap.clone())?);
    let default_location = config.ussd.default_location.clone();

    match command {
        Commands::Simulate(args) => {
            let store = Arc::new(InMemorySessionStore::new(default_location));
            let service = UssdService::new(store, client, &config.ussd);
            let session_id = args
                .session_id
                .unwrap_or_else(|| format!("sim-{}", Utc::now().timestamp_millis()));
            let simulator = GatewaySimulator::new(session_id, args.phone, args.service_code);
            simulator::run(&service, simulator).await?;
        }
        Commands::Weather { location } => {
            let location = location.unwrap_or(default_location);
            let weather = client.fetch_current(&location).await?;
            println!("{}", serde_json::to_string_pretty(&weather)?);
        }
        Commands::Forecast { location } => {
            let location = location.unwrap_or(default_location);
            let forecast = client.fetch_forecast(&location).await?;
            let days = summarize_days(&forecast.samples, Language::English, FORECAST_DAYS);

            let output = serde_json::json!({
                "forecast": forecast,
                "days": days,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Check => {
            println!("Config: OK");
            println!("  Default location: {}", default_location);
            println!("  Session timeout: {}s", config.ussd.session_timeout_secs);
            println!(
                "  Advice rules: {}",
                AdviceEngine::new().list_rules().join(", ")
            );

            match client.test_connection(&default_location).await {
                Ok(true) => println!("OpenWeatherMap: OK"),
                Ok(false) => println!("OpenWeatherMap: FAILED (unexpected response)"),
                Err(e) => println!("OpenWeatherMap: OFFLINE ({})", e),
            }
        }
        Commands::Init => {}
    }

    Ok(())
}
