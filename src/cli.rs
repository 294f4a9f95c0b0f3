use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_PHONE: &str = "+256700000000";
pub const DEFAULT_SERVICE_CODE: &str = "*384*1#";

#[derive(Parser)]
#[command(
    name = "farmweather",
    version,
    about = "USSD weather and farming advice service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the USSD menu interactively (default)
    Simulate(SimulateArgs),
    /// Print current weather as JSON
    Weather {
        /// Place name, defaults to the configured location
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Print the forecast and its day summaries as JSON
    Forecast {
        /// Place name, defaults to the configured location
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Validate config and test the weather provider
    Check,
    /// Re-run interactive setup
    Init,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Caller's phone number
    #[arg(long, default_value = DEFAULT_PHONE)]
    pub phone: String,

    /// Service code the caller dialed
    #[arg(long, default_value = DEFAULT_SERVICE_CODE)]
    pub service_code: String,

    /// Gateway session id, generated when omitted
    #[arg(long)]
    pub session_id: Option<String>,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            phone: DEFAULT_PHONE.into(),
            service_code: DEFAULT_SERVICE_CODE.into(),
            session_id: None,
        }
    }
}
