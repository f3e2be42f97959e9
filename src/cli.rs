use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "travelbot",
    version,
    about = "Chat assistant for weather forecasts and travel recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the directory holding locations.json
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (default)
    Chat,
    /// Show the 5 day forecast for a place
    Weather {
        /// Place name, e.g. "New York"
        location: Vec<String>,
    },
    /// Save a named location
    Save {
        name: String,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Recommend the destination with the best forecast
    Recommend {
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// List saved locations
    Locations,
    /// Re-run interactive setup
    Init,
    /// Validate config and test the forecast connection
    Check,
}

impl Cli {
    /// Log filter for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}
